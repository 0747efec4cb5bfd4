use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Model;
use serde_json::{json, Value};
use service::payload::parse_object;
use service::states;

use super::json_list;
use crate::errors::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Value>> {
    json_list(states::list_states(&state.storage).await)
}

pub async fn show(State(state): State<AppState>, Path(state_id): Path<String>) -> Result<Json<Value>, ApiError> {
    let found = states::get_state(&state.storage, &state_id).await?;
    Ok(Json(found.to_json()))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Value>), ApiError> {
    let created = states::create_state(&state.storage, parse_object(&body)).await?;
    Ok((StatusCode::CREATED, Json(created.to_json())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let updated = states::update_state(&state.storage, &state_id, parse_object(&body)).await?;
    Ok(Json(updated.to_json()))
}

pub async fn remove(State(state): State<AppState>, Path(state_id): Path<String>) -> Result<Json<Value>, ApiError> {
    states::delete_state(&state.storage, &state_id).await?;
    Ok(Json(json!({})))
}
