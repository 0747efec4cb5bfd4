use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Model;
use serde_json::{json, Value};
use service::cities;
use service::payload::parse_object;

use super::json_list;
use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /states/:state_id/cities`
pub async fn list(State(state): State<AppState>, Path(state_id): Path<String>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(json_list(cities::list_cities_of_state(&state.storage, &state_id).await?))
}

pub async fn show(State(state): State<AppState>, Path(city_id): Path<String>) -> Result<Json<Value>, ApiError> {
    Ok(Json(cities::get_city(&state.storage, &city_id).await?.to_json()))
}

/// `POST /states/:state_id/cities`
pub async fn create(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let city = cities::create_city(&state.storage, &state_id, parse_object(&body)).await?;
    Ok((StatusCode::CREATED, Json(city.to_json())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let city = cities::update_city(&state.storage, &city_id, parse_object(&body)).await?;
    Ok(Json(city.to_json()))
}

pub async fn remove(State(state): State<AppState>, Path(city_id): Path<String>) -> Result<Json<Value>, ApiError> {
    cities::delete_city(&state.storage, &city_id).await?;
    Ok(Json(json!({})))
}
