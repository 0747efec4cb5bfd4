use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::payload::Payload;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewAmenity {
    pub name: String,
}

impl Payload for NewAmenity {
    const FIELDS: &'static [&'static str] = &["name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at"];
    const REJECT_UNKNOWN: bool = false;
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmenityPatch {
    pub name: Option<String>,
}

impl Payload for AmenityPatch {
    const FIELDS: &'static [&'static str] = &["name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at"];
}

impl Amenity {
    pub fn new(input: NewAmenity) -> Self {
        Self { base: Base::new(), name: input.name }
    }

    pub fn apply(&mut self, patch: AmenityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}
