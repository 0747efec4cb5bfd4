//! Parent/child bookkeeping: child listings and cascading removal.
//!
//! Removal helpers only stage deletions into a [`Batch`]; callers commit it.

use models::{Amenity, City, Model, Place, Review, State, User};
use tracing::debug;

use crate::storage::{Batch, Storage};

/// Objects in creation order, ties broken by id.
pub(crate) fn oldest_first<T: Model>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort_by(|a, b| {
        a.base().created_at.cmp(&b.base().created_at).then_with(|| a.id().cmp(b.id()))
    });
    items
}

/// Every `T` for which `belongs` holds, oldest first.
pub(crate) async fn children<T, F>(storage: &Storage, belongs: F) -> Vec<T>
where
    T: Model,
    F: Fn(&T) -> bool,
{
    oldest_first(storage.all::<T>().await.into_values().filter(|obj| belongs(obj)))
}

pub(crate) async fn remove_place(batch: &mut Batch<'_>, place_id: &str) {
    let reviews = children::<Review, _>(batch.storage(), |r| r.place_id == place_id).await;
    for review in &reviews {
        batch.delete::<Review>(review.id()).await;
    }
    batch.delete::<Place>(place_id).await;
    debug!(place_id, reviews = reviews.len(), "place removed");
}

pub(crate) async fn remove_city(batch: &mut Batch<'_>, city_id: &str) {
    for place in children::<Place, _>(batch.storage(), |p| p.city_id == city_id).await {
        remove_place(batch, place.id()).await;
    }
    batch.delete::<City>(city_id).await;
}

pub(crate) async fn remove_state(batch: &mut Batch<'_>, state_id: &str) {
    for city in children::<City, _>(batch.storage(), |c| c.state_id == state_id).await {
        remove_city(batch, city.id()).await;
    }
    batch.delete::<State>(state_id).await;
}

pub(crate) async fn remove_user(batch: &mut Batch<'_>, user_id: &str) {
    for place in children::<Place, _>(batch.storage(), |p| p.user_id == user_id).await {
        remove_place(batch, place.id()).await;
    }
    for review in children::<Review, _>(batch.storage(), |r| r.user_id == user_id).await {
        batch.delete::<Review>(review.id()).await;
    }
    batch.delete::<User>(user_id).await;
}

pub(crate) async fn remove_amenity(batch: &mut Batch<'_>, amenity_id: &str) {
    for place in children::<Place, _>(batch.storage(), |p| p.has_amenity(amenity_id)).await {
        batch
            .update::<Place, _>(place.id(), |p| {
                p.unlink_amenity(amenity_id);
            })
            .await;
    }
    batch.delete::<Amenity>(amenity_id).await;
}

#[cfg(test)]
mod tests {
    use crate::amenities::{create_amenity, delete_amenity};
    use crate::errors::ServiceError;
    use crate::cities::create_city;
    use crate::payload::parse_object;
    use crate::place_amenities::{link_amenity, list_place_amenities};
    use crate::places::{create_place, get_place};
    use crate::reviews::{create_review, list_reviews_of_place};
    use crate::states::{create_state, delete_state};
    use crate::stats::stats;
    use crate::test_support::memory_storage;
    use crate::users::{create_user, delete_user};
    use models::{Model, Place, Review, User};

    use crate::storage::Storage;

    struct World {
        state_id: String,
        user: User,
        place: Place,
        review: Review,
    }

    async fn build(storage: &Storage) -> World {
        let state = create_state(storage, parse_object(br#"{"name": "CA"}"#)).await.unwrap();
        let city = create_city(storage, state.id(), parse_object(br#"{"name": "SF"}"#)).await.unwrap();
        let user = create_user(storage, parse_object(br#"{"email": "o@hbnb.io", "password": "pw"}"#))
            .await
            .unwrap();
        let body = format!(r#"{{"user_id": "{}", "name": "Loft"}}"#, user.id());
        let place = create_place(storage, city.id(), parse_object(body.as_bytes())).await.unwrap();
        let body = format!(r#"{{"user_id": "{}", "text": "Great"}}"#, user.id());
        let review = create_review(storage, place.id(), parse_object(body.as_bytes())).await.unwrap();
        World { state_id: state.base.id, user, place, review }
    }

    #[tokio::test]
    async fn deleting_a_state_removes_everything_below_it() {
        let (_, storage) = memory_storage().await;
        let world = build(&storage).await;
        delete_state(&storage, &world.state_id).await.unwrap();

        let counts = stats(&storage).await;
        assert_eq!(counts["states"], 0);
        assert_eq!(counts["cities"], 0);
        assert_eq!(counts["places"], 0);
        assert_eq!(counts["reviews"], 0);
        assert_eq!(counts["users"], 1);
        assert!(storage.get::<Review>(world.review.id()).await.is_none());
    }

    #[tokio::test]
    async fn deleting_a_user_removes_their_places_and_reviews() {
        let (_, storage) = memory_storage().await;
        let world = build(&storage).await;
        delete_user(&storage, world.user.id()).await.unwrap();

        assert!(get_place(&storage, world.place.id()).await.is_err());
        assert!(list_reviews_of_place(&storage, world.place.id()).await.is_err());
        let counts = stats(&storage).await;
        assert_eq!(counts["cities"], 1);
        assert_eq!(counts["reviews"], 0);
    }

    #[tokio::test]
    async fn deleting_an_amenity_unlinks_it() {
        let (_, storage) = memory_storage().await;
        let world = build(&storage).await;
        let wifi = create_amenity(&storage, parse_object(br#"{"name": "Wifi"}"#)).await.unwrap();
        link_amenity(&storage, world.place.id(), wifi.id()).await.unwrap();
        assert_eq!(list_place_amenities(&storage, world.place.id()).await.unwrap(), vec![wifi.clone()]);

        delete_amenity(&storage, wifi.id()).await.unwrap();
        let place = get_place(&storage, world.place.id()).await.unwrap();
        assert!(place.amenity_ids.is_empty());
        assert!(list_place_amenities(&storage, world.place.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_cascade_restores_the_whole_tree() {
        let (engine, storage) = memory_storage().await;
        let world = build(&storage).await;
        let wifi = create_amenity(&storage, parse_object(br#"{"name": "Wifi"}"#)).await.unwrap();
        link_amenity(&storage, world.place.id(), wifi.id()).await.unwrap();
        let before = stats(&storage).await;

        engine.set_failing(true);
        let err = delete_state(&storage, &world.state_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        let err = delete_amenity(&storage, wifi.id()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));

        assert_eq!(stats(&storage).await, before);
        assert_eq!(storage.pending().await, 0);
        assert!(get_place(&storage, world.place.id()).await.unwrap().has_amenity(wifi.id()));
        assert_eq!(storage.get::<Review>(world.review.id()).await, Some(world.review.clone()));
    }
}
