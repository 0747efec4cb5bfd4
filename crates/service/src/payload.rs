//! Request body handling shared by the create and update operations.

use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// A request body after parsing: `None` unless it was a JSON object.
pub type Body = Option<Map<String, Value>>;

/// Parse raw request bytes, ignoring any declared content type.
pub fn parse_object(bytes: &[u8]) -> Body {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

pub(crate) fn require_object(body: Body) -> Result<Map<String, Value>, ServiceError> {
    body.ok_or_else(ServiceError::not_json)
}

pub(crate) fn require_field(object: &Map<String, Value>, field: &str) -> Result<(), ServiceError> {
    if object.contains_key(field) {
        Ok(())
    } else {
        Err(ServiceError::missing(field))
    }
}
