use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::payload::Payload;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewState {
    pub name: String,
}

impl Payload for NewState {
    const FIELDS: &'static [&'static str] = &["name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at"];
    const REJECT_UNKNOWN: bool = false;
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatePatch {
    pub name: Option<String>,
}

impl Payload for StatePatch {
    const FIELDS: &'static [&'static str] = &["name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at"];
}

impl State {
    pub fn new(input: NewState) -> Self {
        Self { base: Base::new(), name: input.name }
    }

    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}
