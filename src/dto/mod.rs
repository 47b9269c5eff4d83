pub mod cart;
pub mod invoices;
pub mod orders;
pub mod reviews;
pub mod users;

use chrono::SecondsFormat;
use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// A field counts as provided only when it is truthy: `null`, empty strings,
/// zero and `false` are all treated as missing.
pub fn json_provided(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Same rule for values already in BSON form.
pub fn bson_provided(value: Option<&Bson>) -> bool {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => false,
        Some(Bson::Boolean(b)) => *b,
        Some(Bson::String(s)) => !s.is_empty(),
        Some(Bson::Int32(n)) => *n != 0,
        Some(Bson::Int64(n)) => *n != 0,
        Some(Bson::Double(n)) => *n != 0.0,
        Some(_) => true,
    }
}

/// Render a stored document for the wire: ids as hex strings, timestamps as
/// RFC 3339, everything else as plain JSON.
pub fn document_to_json(doc: Document) -> Value {
    bson_to_json(Bson::Document(doc))
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => {
            Value::String(dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => {
            Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
        }
        other => other.into_relaxed_extjson(),
    }
}
