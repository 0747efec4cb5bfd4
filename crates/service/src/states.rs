use models::payload::Payload;
use models::state::{NewState, StatePatch};
use models::State;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::payload::{require_field, require_object, Body};
use crate::relations::{oldest_first, remove_state};
use crate::storage::Storage;

pub async fn list_states(storage: &Storage) -> Vec<State> {
    oldest_first(storage.all::<State>().await.into_values())
}

pub async fn get_state(storage: &Storage, id: &str) -> Result<State, ServiceError> {
    storage.get::<State>(id).await.ok_or_else(|| ServiceError::not_found("State"))
}

#[instrument(skip(storage, body))]
pub async fn create_state(storage: &Storage, body: Body) -> Result<State, ServiceError> {
    let object = require_object(body)?;
    require_field(&object, "name")?;
    let state = State::new(NewState::from_object(object)?);
    let mut batch = storage.batch();
    batch.insert(state.clone()).await;
    batch.commit().await?;
    info!(kind = "State", id = %state.base.id, "created");
    Ok(state)
}

#[instrument(skip(storage, body))]
pub async fn update_state(storage: &Storage, id: &str, body: Body) -> Result<State, ServiceError> {
    get_state(storage, id).await?;
    let patch = StatePatch::from_object(require_object(body)?)?;
    let mut batch = storage.batch();
    let state = batch
        .update::<State, _>(id, |s| s.apply(patch))
        .await
        .ok_or_else(|| ServiceError::not_found("State"))?;
    batch.commit().await?;
    info!(kind = "State", id, "updated");
    Ok(state)
}

/// Delete a state together with its cities and everything under them.
#[instrument(skip(storage))]
pub async fn delete_state(storage: &Storage, id: &str) -> Result<(), ServiceError> {
    get_state(storage, id).await?;
    let mut batch = storage.batch();
    remove_state(&mut batch, id).await;
    batch.commit().await?;
    info!(kind = "State", id, "deleted");
    Ok(())
}
