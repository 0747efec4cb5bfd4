pub mod amenities;
pub mod cities;
pub mod index;
pub mod place_amenities;
pub mod places;
pub mod reviews;
pub mod states;
pub mod users;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use models::Model;
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::metrics::{metrics_handler, track_metrics};
use crate::state::AppState;

/// API representation of a list of objects.
pub(crate) fn json_list<T: Model>(items: Vec<T>) -> Json<Vec<Value>> {
    Json(items.iter().map(Model::to_json).collect())
}

fn api_v1() -> Router<AppState> {
    Router::new()
        .route("/status", get(index::status))
        .route("/stats", get(index::stats))
        .route("/states", get(states::list).post(states::create))
        .route("/states/:state_id", get(states::show).put(states::update).delete(states::remove))
        .route("/states/:state_id/cities", get(cities::list).post(cities::create))
        .route("/cities/:city_id", get(cities::show).put(cities::update).delete(cities::remove))
        .route("/amenities", get(amenities::list).post(amenities::create))
        .route(
            "/amenities/:amenity_id",
            get(amenities::show).put(amenities::update).delete(amenities::remove),
        )
        .route("/users", get(users::list).post(users::create))
        .route("/users/:user_id", get(users::show).put(users::update).delete(users::remove))
        .route("/cities/:city_id/places", get(places::list).post(places::create))
        .route("/places/:place_id", get(places::show).put(places::update).delete(places::remove))
        .route("/places/:place_id/reviews", get(reviews::list).post(reviews::create))
        .route("/reviews/:review_id", get(reviews::show).put(reviews::update).delete(reviews::remove))
        .route("/places/:place_id/amenities", get(place_amenities::list))
        .route(
            "/places/:place_id/amenities/:amenity_id",
            post(place_amenities::link).delete(place_amenities::unlink),
        )
}

/// Build the full application router: the `/api/v1` surface plus `/metrics`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api/v1", api_v1())
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
