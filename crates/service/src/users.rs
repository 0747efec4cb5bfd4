use models::payload::Payload;
use models::user::{NewUser, UserPatch};
use models::User;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::password::hash_password;
use crate::payload::{require_field, require_object, Body};
use crate::relations::{oldest_first, remove_user};
use crate::storage::Storage;

pub async fn list_users(storage: &Storage) -> Vec<User> {
    oldest_first(storage.all::<User>().await.into_values())
}

pub async fn get_user(storage: &Storage, id: &str) -> Result<User, ServiceError> {
    storage.get::<User>(id).await.ok_or_else(|| ServiceError::not_found("User"))
}

/// Create a user; the password is stored as an argon2 hash.
#[instrument(skip(storage, body))]
pub async fn create_user(storage: &Storage, body: Body) -> Result<User, ServiceError> {
    let object = require_object(body)?;
    require_field(&object, "email")?;
    require_field(&object, "password")?;
    let input = NewUser::from_object(object)?;
    input.validate()?;
    let hash = hash_password(&input.password)?;
    let user = User::new(input, hash);
    let mut batch = storage.batch();
    batch.insert(user.clone()).await;
    batch.commit().await?;
    info!(kind = "User", id = %user.base.id, "created");
    Ok(user)
}

#[instrument(skip(storage, body))]
pub async fn update_user(storage: &Storage, id: &str, body: Body) -> Result<User, ServiceError> {
    get_user(storage, id).await?;
    let mut patch = UserPatch::from_object(require_object(body)?)?;
    patch.validate()?;
    if let Some(plain) = patch.password.take() {
        patch.password = Some(hash_password(&plain)?);
    }
    let mut batch = storage.batch();
    let user = batch
        .update::<User, _>(id, |u| u.apply(patch))
        .await
        .ok_or_else(|| ServiceError::not_found("User"))?;
    batch.commit().await?;
    info!(kind = "User", id, "updated");
    Ok(user)
}

/// Delete a user with their places and reviews.
#[instrument(skip(storage))]
pub async fn delete_user(storage: &Storage, id: &str) -> Result<(), ServiceError> {
    get_user(storage, id).await?;
    let mut batch = storage.batch();
    remove_user(&mut batch, id).await;
    batch.commit().await?;
    info!(kind = "User", id, "deleted");
    Ok(())
}
