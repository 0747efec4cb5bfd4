use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Model;
use serde_json::{json, Value};
use service::payload::parse_object;
use service::places;

use super::json_list;
use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /cities/:city_id/places`
pub async fn list(State(state): State<AppState>, Path(city_id): Path<String>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(json_list(places::list_places_of_city(&state.storage, &city_id).await?))
}

pub async fn show(State(state): State<AppState>, Path(place_id): Path<String>) -> Result<Json<Value>, ApiError> {
    Ok(Json(places::get_place(&state.storage, &place_id).await?.to_json()))
}

/// `POST /cities/:city_id/places`
pub async fn create(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let place = places::create_place(&state.storage, &city_id, parse_object(&body)).await?;
    Ok((StatusCode::CREATED, Json(place.to_json())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let place = places::update_place(&state.storage, &place_id, parse_object(&body)).await?;
    Ok(Json(place.to_json()))
}

pub async fn remove(State(state): State<AppState>, Path(place_id): Path<String>) -> Result<Json<Value>, ApiError> {
    places::delete_place(&state.storage, &place_id).await?;
    Ok(Json(json!({})))
}
