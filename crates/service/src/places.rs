use models::payload::Payload;
use models::place::{NewPlace, PlacePatch};
use models::{Place, User};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::cities::get_city;
use crate::errors::ServiceError;
use crate::payload::{require_field, require_object, Body};
use crate::relations::{children, remove_place};
use crate::storage::Storage;

/// Places in an existing city; an unknown city is not found.
pub async fn list_places_of_city(storage: &Storage, city_id: &str) -> Result<Vec<Place>, ServiceError> {
    get_city(storage, city_id).await?;
    Ok(children::<Place, _>(storage, |p| p.city_id == city_id).await)
}

pub async fn get_place(storage: &Storage, id: &str) -> Result<Place, ServiceError> {
    storage.get::<Place>(id).await.ok_or_else(|| ServiceError::not_found("Place"))
}

/// The owner named by `user_id` in a creation body must exist.
pub(crate) async fn require_author(storage: &Storage, object: &Map<String, Value>) -> Result<(), ServiceError> {
    require_field(object, "user_id")?;
    let exists = match object.get("user_id").and_then(Value::as_str) {
        Some(user_id) => storage.get::<User>(user_id).await.is_some(),
        None => false,
    };
    if !exists {
        return Err(ServiceError::not_found("User"));
    }
    Ok(())
}

#[instrument(skip(storage, body))]
pub async fn create_place(storage: &Storage, city_id: &str, body: Body) -> Result<Place, ServiceError> {
    get_city(storage, city_id).await?;
    let object = require_object(body)?;
    require_author(storage, &object).await?;
    require_field(&object, "name")?;
    let place = Place::new(city_id, NewPlace::from_object(object)?);
    let mut batch = storage.batch();
    batch.insert(place.clone()).await;
    batch.commit().await?;
    info!(kind = "Place", id = %place.base.id, city_id, "created");
    Ok(place)
}

#[instrument(skip(storage, body))]
pub async fn update_place(storage: &Storage, id: &str, body: Body) -> Result<Place, ServiceError> {
    get_place(storage, id).await?;
    let patch = PlacePatch::from_object(require_object(body)?)?;
    let mut batch = storage.batch();
    let place = batch
        .update::<Place, _>(id, |p| p.apply(patch))
        .await
        .ok_or_else(|| ServiceError::not_found("Place"))?;
    batch.commit().await?;
    info!(kind = "Place", id, "updated");
    Ok(place)
}

/// Delete a place and its reviews.
#[instrument(skip(storage))]
pub async fn delete_place(storage: &Storage, id: &str) -> Result<(), ServiceError> {
    get_place(storage, id).await?;
    let mut batch = storage.batch();
    remove_place(&mut batch, id).await;
    batch.commit().await?;
    info!(kind = "Place", id, "deleted");
    Ok(())
}
