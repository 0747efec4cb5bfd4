use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Model;
use serde_json::{json, Value};
use service::payload::parse_object;
use service::users;

use super::json_list;
use crate::errors::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Value>> {
    json_list(users::list_users(&state.storage).await)
}

pub async fn show(State(state): State<AppState>, Path(user_id): Path<String>) -> Result<Json<Value>, ApiError> {
    Ok(Json(users::get_user(&state.storage, &user_id).await?.to_json()))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = users::create_user(&state.storage, parse_object(&body)).await?;
    Ok((StatusCode::CREATED, Json(user.to_json())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let user = users::update_user(&state.storage, &user_id, parse_object(&body)).await?;
    Ok(Json(user.to_json()))
}

pub async fn remove(State(state): State<AppState>, Path(user_id): Path<String>) -> Result<Json<Value>, ApiError> {
    users::delete_user(&state.storage, &user_id).await?;
    Ok(Json(json!({})))
}
