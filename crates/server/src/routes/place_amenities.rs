use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Model;
use serde_json::{json, Value};
use service::place_amenities::{self, Link};

use super::json_list;
use crate::errors::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, Path(place_id): Path<String>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(json_list(place_amenities::list_place_amenities(&state.storage, &place_id).await?))
}

/// 201 when the link is new, 200 when it already existed.
pub async fn link(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (amenity, link) = place_amenities::link_amenity(&state.storage, &place_id, &amenity_id).await?;
    let status = match link {
        Link::Created => StatusCode::CREATED,
        Link::Existing => StatusCode::OK,
    };
    Ok((status, Json(amenity.to_json())))
}

pub async fn unlink(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    place_amenities::unlink_amenity(&state.storage, &place_id, &amenity_id).await?;
    Ok(Json(json!({})))
}
