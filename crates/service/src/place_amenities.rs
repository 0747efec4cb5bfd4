//! Links between places and amenities, stored as the place's `amenity_ids`.

use models::{Amenity, Place};
use tracing::{info, instrument};

use crate::amenities::get_amenity;
use crate::errors::ServiceError;
use crate::places::get_place;
use crate::relations::oldest_first;
use crate::storage::Storage;

/// Whether a link call created the link or found it already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    Created,
    Existing,
}

/// Amenities linked to a place. Ids whose amenity no longer exists are skipped.
pub async fn list_place_amenities(storage: &Storage, place_id: &str) -> Result<Vec<Amenity>, ServiceError> {
    let place = get_place(storage, place_id).await?;
    let mut amenities = Vec::with_capacity(place.amenity_ids.len());
    for id in &place.amenity_ids {
        if let Some(amenity) = storage.get::<Amenity>(id).await {
            amenities.push(amenity);
        }
    }
    Ok(oldest_first(amenities))
}

#[instrument(skip(storage))]
pub async fn link_amenity(storage: &Storage, place_id: &str, amenity_id: &str) -> Result<(Amenity, Link), ServiceError> {
    let place = get_place(storage, place_id).await?;
    let amenity = get_amenity(storage, amenity_id).await?;
    if place.has_amenity(amenity_id) {
        return Ok((amenity, Link::Existing));
    }
    let mut batch = storage.batch();
    batch
        .update::<Place, _>(place_id, |p| {
            p.link_amenity(amenity_id);
        })
        .await
        .ok_or_else(|| ServiceError::not_found("Place"))?;
    batch.commit().await?;
    info!(place_id, amenity_id, "amenity linked");
    Ok((amenity, Link::Created))
}

/// Remove a link; a place that does not carry the amenity is not found.
#[instrument(skip(storage))]
pub async fn unlink_amenity(storage: &Storage, place_id: &str, amenity_id: &str) -> Result<(), ServiceError> {
    let place = get_place(storage, place_id).await?;
    get_amenity(storage, amenity_id).await?;
    if !place.has_amenity(amenity_id) {
        return Err(ServiceError::not_found("Amenity link"));
    }
    let mut batch = storage.batch();
    batch
        .update::<Place, _>(place_id, |p| {
            p.unlink_amenity(amenity_id);
        })
        .await
        .ok_or_else(|| ServiceError::not_found("Place"))?;
    batch.commit().await?;
    info!(place_id, amenity_id, "amenity unlinked");
    Ok(())
}
