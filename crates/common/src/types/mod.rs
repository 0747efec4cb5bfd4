use serde::{Deserialize, Serialize};

/// Body of the `/status` probe.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub status: String,
}

impl Status {
    pub fn ok() -> Self {
        Self { status: "OK".to_string() }
    }
}
