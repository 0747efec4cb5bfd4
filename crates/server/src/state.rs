use std::sync::Arc;

use service::Storage;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

impl AppState {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}
