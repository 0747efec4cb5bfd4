use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::payload::Payload;

/// A review left by `user_id` on `place_id`. Both keys are fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: Base,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewReview {
    pub user_id: String,
    pub text: String,
}

impl Payload for NewReview {
    const FIELDS: &'static [&'static str] = &["user_id", "text"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at", "place_id"];
    const REJECT_UNKNOWN: bool = false;
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewPatch {
    pub text: Option<String>,
}

impl Payload for ReviewPatch {
    const FIELDS: &'static [&'static str] = &["text"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at", "user_id", "place_id"];
}

impl Review {
    pub fn new(place_id: &str, input: NewReview) -> Self {
        Self {
            base: Base::new(),
            place_id: place_id.to_string(),
            user_id: input.user_id,
            text: input.text,
        }
    }

    pub fn apply(&mut self, patch: ReviewPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
    }
}
