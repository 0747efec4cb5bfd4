use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Model;
use serde_json::{json, Value};
use service::amenities;
use service::payload::parse_object;

use super::json_list;
use crate::errors::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Value>> {
    json_list(amenities::list_amenities(&state.storage).await)
}

pub async fn show(State(state): State<AppState>, Path(amenity_id): Path<String>) -> Result<Json<Value>, ApiError> {
    Ok(Json(amenities::get_amenity(&state.storage, &amenity_id).await?.to_json()))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Value>), ApiError> {
    let amenity = amenities::create_amenity(&state.storage, parse_object(&body)).await?;
    Ok((StatusCode::CREATED, Json(amenity.to_json())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let amenity = amenities::update_amenity(&state.storage, &amenity_id, parse_object(&body)).await?;
    Ok(Json(amenity.to_json()))
}

pub async fn remove(State(state): State<AppState>, Path(amenity_id): Path<String>) -> Result<Json<Value>, ApiError> {
    amenities::delete_amenity(&state.storage, &amenity_id).await?;
    Ok(Json(json!({})))
}
