use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::bson_to_json;
use crate::models::Invoice;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[schema(value_type = Option<String>)]
    pub order_id: Option<Value>,
    pub user_email: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub items: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub customer: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[schema(value_type = String)]
    pub order_id: Value,
    pub user_email: String,
    #[schema(value_type = Object)]
    pub items: Value,
    #[schema(value_type = f64)]
    pub total_amount: Value,
    #[schema(value_type = Object)]
    pub customer: Value,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            order_id: bson_to_json(invoice.order_id),
            user_email: invoice.user_email,
            items: bson_to_json(invoice.items),
            total_amount: bson_to_json(invoice.total_amount),
            customer: bson_to_json(invoice.customer),
            created_at: invoice.created_at.to_chrono(),
        }
    }
}
