use mongodb::results::UpdateResult;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Success {
    pub success: bool,
}

/// Raw insert acknowledgement, mirroring the driver's result document.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inserted {
    #[schema(value_type = String)]
    pub inserted_id: Value,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartInserted {
    pub success: bool,
    pub inserted_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessMessage {
    pub success: bool,
    pub message: String,
}

/// Raw update acknowledgement, mirroring the driver's result document.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl From<UpdateResult> for UpdateOutcome {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result
            .upserted_id
            .as_ref()
            .and_then(|id| id.as_object_id())
            .map(|oid| oid.to_hex());
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: upserted_id.is_some() as u64,
            upserted_id,
        }
    }
}
