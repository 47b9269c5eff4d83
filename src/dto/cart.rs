use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::bson_to_json;
use crate::models::CartItem;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub guest_id: Option<String>,
    pub product_id: Option<String>,
    pub item_name: Option<String>,
    pub image: Option<String>,
    pub quantity: Option<i64>,
    #[schema(value_type = Option<f64>)]
    pub sell_price: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub guest_id: String,
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub sell_price: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            guest_id: item.guest_id,
            product_id: item.product_id,
            quantity: item.quantity,
            image: item.image,
            item_name: item.item_name,
            sell_price: item.sell_price.map(bson_to_json),
            created_at: item.created_at.to_chrono(),
        }
    }
}
