use models::amenity::{AmenityPatch, NewAmenity};
use models::payload::Payload;
use models::Amenity;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::payload::{require_field, require_object, Body};
use crate::relations::{oldest_first, remove_amenity};
use crate::storage::Storage;

pub async fn list_amenities(storage: &Storage) -> Vec<Amenity> {
    oldest_first(storage.all::<Amenity>().await.into_values())
}

pub async fn get_amenity(storage: &Storage, id: &str) -> Result<Amenity, ServiceError> {
    storage.get::<Amenity>(id).await.ok_or_else(|| ServiceError::not_found("Amenity"))
}

#[instrument(skip(storage, body))]
pub async fn create_amenity(storage: &Storage, body: Body) -> Result<Amenity, ServiceError> {
    let object = require_object(body)?;
    require_field(&object, "name")?;
    let amenity = Amenity::new(NewAmenity::from_object(object)?);
    let mut batch = storage.batch();
    batch.insert(amenity.clone()).await;
    batch.commit().await?;
    info!(kind = "Amenity", id = %amenity.base.id, "created");
    Ok(amenity)
}

/// Unlike the other updates, the body is checked before the lookup.
#[instrument(skip(storage, body))]
pub async fn update_amenity(storage: &Storage, id: &str, body: Body) -> Result<Amenity, ServiceError> {
    let object = require_object(body)?;
    get_amenity(storage, id).await?;
    let patch = AmenityPatch::from_object(object)?;
    let mut batch = storage.batch();
    let amenity = batch
        .update::<Amenity, _>(id, |a| a.apply(patch))
        .await
        .ok_or_else(|| ServiceError::not_found("Amenity"))?;
    batch.commit().await?;
    info!(kind = "Amenity", id, "updated");
    Ok(amenity)
}

/// Delete an amenity and unlink it from every place.
#[instrument(skip(storage))]
pub async fn delete_amenity(storage: &Storage, id: &str) -> Result<(), ServiceError> {
    get_amenity(storage, id).await?;
    let mut batch = storage.batch();
    remove_amenity(&mut batch, id).await;
    batch.commit().await?;
    info!(kind = "Amenity", id, "deleted");
    Ok(())
}
