//! Request payload decoding shared by the create and patch types.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// A typed view of a JSON object sent by a client.
///
/// `FIELDS` lists the keys the type deserializes; `IGNORED` lists keys that
/// are accepted and dropped (server-owned identity, timestamps and parent
/// keys). Any other key is rejected when `REJECT_UNKNOWN` is set and
/// dropped otherwise; create payloads drop, patches reject.
pub trait Payload: DeserializeOwned {
    const FIELDS: &'static [&'static str];
    const IGNORED: &'static [&'static str];
    const REJECT_UNKNOWN: bool = true;

    fn from_object(mut object: Map<String, Value>) -> Result<Self, ModelError> {
        object.retain(|key, _| !Self::IGNORED.contains(&key.as_str()));
        if Self::REJECT_UNKNOWN {
            if let Some(unknown) = object.keys().find(|key| !Self::FIELDS.contains(&key.as_str())) {
                return Err(ModelError::UnknownField(unknown.clone()));
            }
        } else {
            object.retain(|key, _| Self::FIELDS.contains(&key.as_str()));
        }
        serde_json::from_value(Value::Object(object)).map_err(|e| ModelError::InvalidPayload(e.to_string()))
    }
}
