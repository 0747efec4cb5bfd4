use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::payload::Payload;

/// A city; `state_id` is fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: Base,
    pub state_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCity {
    pub name: String,
}

impl Payload for NewCity {
    const FIELDS: &'static [&'static str] = &["name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at", "state_id"];
    const REJECT_UNKNOWN: bool = false;
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CityPatch {
    pub name: Option<String>,
}

impl Payload for CityPatch {
    const FIELDS: &'static [&'static str] = &["name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at", "state_id"];
}

impl City {
    pub fn new(state_id: &str, input: NewCity) -> Self {
        Self { base: Base::new(), state_id: state_id.to_string(), name: input.name }
    }

    pub fn apply(&mut self, patch: CityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}
