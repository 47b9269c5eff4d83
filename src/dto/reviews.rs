use chrono::{DateTime, Utc};
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::bson_to_json;
use crate::models::Review;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: Option<String>,
    pub user_email: Option<String>,
    /// Accepted as any JSON value and coerced to a number on the way in.
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Value>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_id: String,
    pub user_email: String,
    #[schema(value_type = f64)]
    pub rating: Value,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            product_id: review.product_id.to_hex(),
            user_email: review.user_email,
            rating: bson_to_json(review.rating),
            comment: review.comment,
            created_at: review.created_at.to_chrono(),
        }
    }
}

/// Integer ratings stay integers; anything else that parses as a finite
/// float is stored as a double.
pub fn coerce_rating(value: &Value) -> Option<Bson> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Bson::Int64(i)),
            None => n.as_f64().map(Bson::Double),
        },
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Some(Bson::Int64(i))
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Bson::Double)
            }
        }
        _ => None,
    }
}
