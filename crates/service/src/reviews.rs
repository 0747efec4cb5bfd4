use models::payload::Payload;
use models::review::{NewReview, ReviewPatch};
use models::Review;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::payload::{require_field, require_object, Body};
use crate::places::{get_place, require_author};
use crate::relations::children;
use crate::storage::Storage;

/// Reviews of an existing place; an unknown place is not found.
pub async fn list_reviews_of_place(storage: &Storage, place_id: &str) -> Result<Vec<Review>, ServiceError> {
    get_place(storage, place_id).await?;
    Ok(children::<Review, _>(storage, |r| r.place_id == place_id).await)
}

pub async fn get_review(storage: &Storage, id: &str) -> Result<Review, ServiceError> {
    storage.get::<Review>(id).await.ok_or_else(|| ServiceError::not_found("Review"))
}

#[instrument(skip(storage, body))]
pub async fn create_review(storage: &Storage, place_id: &str, body: Body) -> Result<Review, ServiceError> {
    get_place(storage, place_id).await?;
    let object = require_object(body)?;
    require_author(storage, &object).await?;
    require_field(&object, "text")?;
    let review = Review::new(place_id, NewReview::from_object(object)?);
    let mut batch = storage.batch();
    batch.insert(review.clone()).await;
    batch.commit().await?;
    info!(kind = "Review", id = %review.base.id, place_id, "created");
    Ok(review)
}

#[instrument(skip(storage, body))]
pub async fn update_review(storage: &Storage, id: &str, body: Body) -> Result<Review, ServiceError> {
    get_review(storage, id).await?;
    let patch = ReviewPatch::from_object(require_object(body)?)?;
    let mut batch = storage.batch();
    let review = batch
        .update::<Review, _>(id, |r| r.apply(patch))
        .await
        .ok_or_else(|| ServiceError::not_found("Review"))?;
    batch.commit().await?;
    info!(kind = "Review", id, "updated");
    Ok(review)
}

#[instrument(skip(storage))]
pub async fn delete_review(storage: &Storage, id: &str) -> Result<(), ServiceError> {
    get_review(storage, id).await?;
    let mut batch = storage.batch();
    batch.delete::<Review>(id).await;
    batch.commit().await?;
    info!(kind = "Review", id, "deleted");
    Ok(())
}
