use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::storage::FileEngine;
use service::Storage;
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    storage: Arc<Storage>,
    file: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(dir) = self.file.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

async fn app() -> TestApp {
    let file = std::env::temp_dir().join(format!("hbnb_api_{}", Uuid::new_v4())).join("file.json");
    let storage = Storage::open(Arc::new(FileEngine::new(&file))).await.expect("open storage");
    TestApp { router: server::build_app(storage.clone()), storage, file }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Option<Value>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { None } else { serde_json::from_slice(&bytes).ok() };
    (status, json)
}

async fn create(app: &TestApp, uri: &str, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, uri, Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri} {body}");
    json.unwrap()
}

fn id(obj: &Value) -> &str {
    obj["id"].as_str().unwrap()
}

#[tokio::test]
async fn status_reports_ok() {
    let app = app().await;
    let (status, json) = send(&app, Method::GET, "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap(), json!({"status": "OK"}));
}

#[tokio::test]
async fn amenity_lifecycle() {
    let app = app().await;
    let wifi = create(&app, "/api/v1/amenities", json!({"name": "Wifi"})).await;
    assert!(!id(&wifi).is_empty());
    assert_eq!(wifi["name"], "Wifi");
    assert!(wifi["created_at"].is_string());
    assert!(wifi["updated_at"].is_string());
    assert!(wifi.get("__class__").is_none());

    let (status, json) = send(&app, Method::POST, "/api/v1/amenities", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json.unwrap(), json!({"error": "Missing name"}));

    let (status, json) = send(&app, Method::GET, "/api/v1/amenities/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.is_none());

    let uri = format!("/api/v1/amenities/{}", id(&wifi));
    let (status, json) = send(&app, Method::PUT, &uri, Some(r#"{"name": "Fiber", "id": "nope"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert_eq!(json["name"], "Fiber");
    assert_eq!(json["id"], wifi["id"]);
    assert_eq!(json["created_at"], wifi["created_at"]);

    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap(), json!({}));
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bodies_that_are_not_objects_are_rejected() {
    let app = app().await;
    for body in ["", "not json", "[1]", "42"] {
        let (status, json) = send(&app, Method::POST, "/api/v1/states", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(json.unwrap(), json!({"error": "Not a JSON"}));
    }
}

#[tokio::test]
async fn unknown_update_fields_are_rejected() {
    let app = app().await;
    let state = create(&app, "/api/v1/states", json!({"name": "CA"})).await;
    let uri = format!("/api/v1/states/{}", id(&state));
    let (status, json) = send(&app, Method::PUT, &uri, Some(r#"{"governor": "x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json.unwrap(), json!({"error": "Unknown field: governor"}));

    let (status, _) = send(&app, Method::PUT, "/api/v1/states/missing", Some("nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_create_fields_are_dropped() {
    let app = app().await;
    let state = create(&app, "/api/v1/states", json!({"name": "CA", "extra": 1, "id": "mine"})).await;
    assert_eq!(state["name"], "CA");
    assert!(state.get("extra").is_none());
    assert_ne!(id(&state), "mine");

    let (status, json) = send(&app, Method::POST, "/api/v1/states", Some(r#"{"name": 7}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.unwrap()["error"].as_str().unwrap().starts_with("Invalid payload"));
}

#[tokio::test]
async fn place_creation_validates_in_order() {
    let app = app().await;
    let state = create(&app, "/api/v1/states", json!({"name": "CA"})).await;
    let city = create(&app, &format!("/api/v1/states/{}/cities", id(&state)), json!({"name": "SF"})).await;
    let places_uri = format!("/api/v1/cities/{}/places", id(&city));

    let (status, _) = send(&app, Method::POST, "/api/v1/cities/missing/places", Some("nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, Method::POST, &places_uri, Some(r#"{"name": "Loft"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json.unwrap(), json!({"error": "Missing user_id"}));

    let (status, _) = send(&app, Method::POST, &places_uri, Some(r#"{"user_id": "ghost", "name": "Loft"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let user = create(&app, "/api/v1/users", json!({"email": "o@hbnb.io", "password": "pw"})).await;
    let body = json!({"user_id": id(&user)}).to_string();
    let (status, json) = send(&app, Method::POST, &places_uri, Some(&body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json.unwrap(), json!({"error": "Missing name"}));

    let place = create(&app, &places_uri, json!({"user_id": id(&user), "name": "Loft", "max_guest": 3})).await;
    assert_eq!(place["city_id"], city["id"]);
    assert_eq!(place["max_guest"], 3);

    let (status, json) = send(&app, Method::GET, &places_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn passwords_never_leave_the_server() {
    let app = app().await;
    let user = create(&app, "/api/v1/users", json!({"email": "a@hbnb.io", "password": "secret"})).await;
    assert!(user.get("password").is_none());

    let (_, json) = send(&app, Method::GET, "/api/v1/users", None).await;
    assert!(json.unwrap()[0].get("password").is_none());

    let uri = format!("/api/v1/users/{}", id(&user));
    let (status, json) = send(&app, Method::PUT, &uri, Some(r#"{"password": "other", "last_name": "L"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let json = json.unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["last_name"], "L");
}

#[tokio::test]
async fn amenity_links_and_stats() {
    let app = app().await;
    let state = create(&app, "/api/v1/states", json!({"name": "CA"})).await;
    let city = create(&app, &format!("/api/v1/states/{}/cities", id(&state)), json!({"name": "SF"})).await;
    let user = create(&app, "/api/v1/users", json!({"email": "o@hbnb.io", "password": "pw"})).await;
    let place = create(
        &app,
        &format!("/api/v1/cities/{}/places", id(&city)),
        json!({"user_id": id(&user), "name": "Loft"}),
    )
    .await;
    create(
        &app,
        &format!("/api/v1/places/{}/reviews", id(&place)),
        json!({"user_id": id(&user), "text": "Lovely"}),
    )
    .await;
    let pool = create(&app, "/api/v1/amenities", json!({"name": "Pool"})).await;

    let link = format!("/api/v1/places/{}/amenities/{}", id(&place), id(&pool));
    assert_eq!(send(&app, Method::POST, &link, None).await.0, StatusCode::CREATED);
    assert_eq!(send(&app, Method::POST, &link, None).await.0, StatusCode::OK);
    let (_, json) = send(&app, Method::GET, &format!("/api/v1/places/{}/amenities", id(&place)), None).await;
    assert_eq!(json.unwrap(), json!([pool.clone()]));

    let (_, json) = send(&app, Method::GET, "/api/v1/stats", None).await;
    assert_eq!(
        json.unwrap(),
        json!({"amenities": 1, "cities": 1, "places": 1, "reviews": 1, "states": 1, "users": 1})
    );

    assert_eq!(send(&app, Method::DELETE, &format!("/api/v1/states/{}", id(&state)), None).await.0, StatusCode::OK);
    let (_, json) = send(&app, Method::GET, "/api/v1/stats", None).await;
    assert_eq!(
        json.unwrap(),
        json!({"amenities": 1, "cities": 0, "places": 0, "reviews": 0, "states": 0, "users": 1})
    );
    assert_eq!(app.storage.pending().await, 0);
}

#[tokio::test]
async fn storage_file_is_readable_after_requests() {
    let app = app().await;
    let state = create(&app, "/api/v1/states", json!({"name": "Nevada"})).await;

    let reopened = Storage::open(Arc::new(FileEngine::new(&app.file))).await.unwrap();
    let found = reopened.get::<models::State>(id(&state)).await.unwrap();
    assert_eq!(found.name, "Nevada");
}

#[tokio::test]
async fn metrics_are_exposed() {
    let app = app().await;
    send(&app, Method::GET, "/api/v1/status", None).await;
    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(text.contains("hbnb_http_requests_total"));
    assert!(text.contains("hbnb_storage_flush_failures_total"));
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = app().await;
    assert_eq!(send(&app, Method::GET, "/api/v1/nope", None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, Method::GET, "/api/v2/status", None).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_flush_is_service_unavailable() {
    let app = app().await;
    let nevada = create(&app, "/api/v1/states", json!({"name": "Nevada"})).await;
    let state_uri = format!("/api/v1/states/{}", id(&nevada));
    let dir = app.file.parent().unwrap().to_path_buf();
    // A plain file where the storage directory should be makes every flush fail.
    std::fs::remove_dir_all(&dir).unwrap();
    std::fs::write(&dir, b"").unwrap();

    let (status, json) = send(&app, Method::POST, "/api/v1/amenities", Some(r#"{"name": "Sauna"}"#)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json.unwrap(), json!({"error": "Storage unavailable"}));
    let (status, json) = send(&app, Method::GET, "/api/v1/amenities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap(), json!([]));
    assert_eq!(app.storage.pending().await, 0);

    let (status, _) = send(&app, Method::DELETE, &state_uri, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let (status, json) = send(&app, Method::GET, &state_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.unwrap()["name"], "Nevada");
    assert_eq!(app.storage.pending().await, 0);

    // Once storage is back, an unrelated write must not carry the failed ones along.
    std::fs::remove_file(&dir).unwrap();
    create(&app, "/api/v1/states", json!({"name": "Utah"})).await;
    let reopened = Storage::open(Arc::new(FileEngine::new(&app.file))).await.unwrap();
    assert!(reopened.all::<models::Amenity>().await.is_empty());
    let states = reopened.all::<models::State>().await;
    assert_eq!(states.len(), 2);
    assert!(states.contains_key(id(&nevada)));
}
