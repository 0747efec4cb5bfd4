use models::city::{CityPatch, NewCity};
use models::payload::Payload;
use models::City;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::payload::{require_field, require_object, Body};
use crate::relations::{children, remove_city};
use crate::states::get_state;
use crate::storage::Storage;

/// Cities of an existing state; an unknown state is not found.
pub async fn list_cities_of_state(storage: &Storage, state_id: &str) -> Result<Vec<City>, ServiceError> {
    get_state(storage, state_id).await?;
    Ok(children::<City, _>(storage, |c| c.state_id == state_id).await)
}

pub async fn get_city(storage: &Storage, id: &str) -> Result<City, ServiceError> {
    storage.get::<City>(id).await.ok_or_else(|| ServiceError::not_found("City"))
}

#[instrument(skip(storage, body))]
pub async fn create_city(storage: &Storage, state_id: &str, body: Body) -> Result<City, ServiceError> {
    get_state(storage, state_id).await?;
    let object = require_object(body)?;
    require_field(&object, "name")?;
    let city = City::new(state_id, NewCity::from_object(object)?);
    let mut batch = storage.batch();
    batch.insert(city.clone()).await;
    batch.commit().await?;
    info!(kind = "City", id = %city.base.id, state_id, "created");
    Ok(city)
}

#[instrument(skip(storage, body))]
pub async fn update_city(storage: &Storage, id: &str, body: Body) -> Result<City, ServiceError> {
    get_city(storage, id).await?;
    let patch = CityPatch::from_object(require_object(body)?)?;
    let mut batch = storage.batch();
    let city = batch
        .update::<City, _>(id, |c| c.apply(patch))
        .await
        .ok_or_else(|| ServiceError::not_found("City"))?;
    batch.commit().await?;
    info!(kind = "City", id, "updated");
    Ok(city)
}

#[instrument(skip(storage))]
pub async fn delete_city(storage: &Storage, id: &str) -> Result<(), ServiceError> {
    get_city(storage, id).await?;
    let mut batch = storage.batch();
    remove_city(&mut batch, id).await;
    batch.commit().await?;
    info!(kind = "City", id, "deleted");
    Ok(())
}
