use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Model;
use serde_json::{json, Value};
use service::payload::parse_object;
use service::reviews;

use super::json_list;
use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /places/:place_id/reviews`
pub async fn list(State(state): State<AppState>, Path(place_id): Path<String>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(json_list(reviews::list_reviews_of_place(&state.storage, &place_id).await?))
}

pub async fn show(State(state): State<AppState>, Path(review_id): Path<String>) -> Result<Json<Value>, ApiError> {
    Ok(Json(reviews::get_review(&state.storage, &review_id).await?.to_json()))
}

/// `POST /places/:place_id/reviews`
pub async fn create(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let review = reviews::create_review(&state.storage, &place_id, parse_object(&body)).await?;
    Ok((StatusCode::CREATED, Json(review.to_json())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let review = reviews::update_review(&state.storage, &review_id, parse_object(&body)).await?;
    Ok(Json(review.to_json()))
}

pub async fn remove(State(state): State<AppState>, Path(review_id): Path<String>) -> Result<Json<Value>, ApiError> {
    reviews::delete_review(&state.storage, &review_id).await?;
    Ok(Json(json!({})))
}
