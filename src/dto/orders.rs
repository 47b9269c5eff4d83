use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::bson_to_json;
use crate::models::Order;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub guest_id: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub items: Option<Vec<Value>>,
    #[schema(value_type = Option<f64>)]
    pub total_price: Option<Value>,
    pub status: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub customer: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub advance_payment: Option<Value>,
    pub payment_proof: Option<String>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub guest_id: String,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub total_price: Option<Value>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub customer: Value,
    #[schema(value_type = Object)]
    pub advance_payment: Value,
    pub payment_proof: String,
    pub transaction_id: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            guest_id: order.guest_id,
            items: order.items.into_iter().map(bson_to_json).collect(),
            total_price: order.total_price.map(bson_to_json),
            status: order.status,
            created_at: order.created_at.to_chrono(),
            customer: bson_to_json(order.customer),
            advance_payment: bson_to_json(order.advance_payment),
            payment_proof: order.payment_proof,
            transaction_id: order.transaction_id,
        }
    }
}
