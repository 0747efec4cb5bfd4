use std::collections::BTreeMap;

use axum::{extract::State, Json};
use common::types::Status;

use crate::state::AppState;

pub async fn status() -> Json<Status> {
    Json(Status::ok())
}

pub async fn stats(State(state): State<AppState>) -> Json<BTreeMap<&'static str, usize>> {
    Json(service::stats::stats(&state.storage).await)
}
