use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use moodtrack_api::{auth::jwt, build_router, config::Config, store::InMemoryMoodStore, AppState};

fn test_config() -> Config {
    Config {
        database_url: String::new(),
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        jwt_secret: "test-secret".into(),
        jwt_access_ttl_secs: 900,
    }
}

fn app() -> (Router, Arc<Config>) {
    let config = Arc::new(test_config());
    let state = AppState::new(Arc::new(InMemoryMoodStore::new()), config.clone());
    (build_router(state), config)
}

fn bearer(config: &Config, user_id: Uuid) -> String {
    let token = jwt::create_access_token(user_id, config).unwrap();
    format!("Bearer {token}")
}

fn request(method: Method, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_entry(app: &Router, auth: &str, mood: i64, stress: i64, anxiety: i64) -> Value {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/moods",
            Some(auth),
            Some(json!({ "mood": mood, "stress": stress, "anxiety": anxiety })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

#[tokio::test]
async fn rejects_requests_without_a_token() {
    let (app, _) = app();

    let (status, body) = send(&app, request(Method::GET, "/api/moods", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/moods", Some("Bearer not-a-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_returns_envelope_with_stored_entry() {
    let (app, config) = app();
    let auth = bearer(&config, Uuid::new_v4());

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/moods",
            Some(&auth),
            Some(json!({ "mood": 4, "stress": 2, "anxiety": 1, "notes": "slept well" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    assert_eq!(data["mood"], json!(4));
    assert_eq!(data["stress"], json!(2));
    assert_eq!(data["anxiety"], json!(1));
    assert_eq!(data["notes"], json!("slept well"));
    assert_eq!(data["average_score"], json!(2.33));
    assert!(data["id"].as_str().unwrap().parse::<Uuid>().is_ok());
    assert!(data["created_at"].is_string());
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let (app, config) = app();
    let auth = bearer(&config, Uuid::new_v4());

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/moods",
            Some(&auth),
            Some(json!({ "mood": 9, "stress": 2, "anxiety": 1 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Mood must be between 1 and 5"));

    let long_notes = "x".repeat(501);
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/moods",
            Some(&auth),
            Some(json!({ "mood": 3, "stress": 3, "anxiety": 3, "notes": long_notes })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // nothing was persisted
    let (_, body) = send(&app, request(Method::GET, "/api/moods", Some(&auth), None)).await;
    assert_eq!(body["pagination"]["total"], json!(0));
}

#[tokio::test]
async fn list_pages_through_entries_most_recent_first() {
    let (app, config) = app();
    let auth = bearer(&config, Uuid::new_v4());
    for mood in 1..=5 {
        create_entry(&app, &auth, mood, 3, 3).await;
    }

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/moods?limit=2&page=2", Some(&auth), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let moods: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["mood"].as_i64().unwrap())
        .collect();
    assert_eq!(moods, vec![3, 2]);
    assert_eq!(
        body["pagination"],
        json!({ "current": 2, "pages": 3, "total": 5 })
    );
}

#[tokio::test]
async fn stats_reports_trend_over_the_window() {
    let (app, config) = app();
    let auth = bearer(&config, Uuid::new_v4());
    // oldest first: the two 5s form the recent half
    for mood in [1, 1, 5, 5] {
        create_entry(&app, &auth, mood, 3, 3).await;
    }

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/moods/stats", Some(&auth), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    assert_eq!(data["trend"], json!("improving"));
    assert_eq!(data["total_entries"], json!(4));
    assert_eq!(data["average_mood"], json!(3.0));
    assert_eq!(data["average_stress"], json!(3.0));
}

#[tokio::test]
async fn stats_with_no_entries_reports_no_data() {
    let (app, config) = app();
    let auth = bearer(&config, Uuid::new_v4());

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/moods/stats?days=7", Some(&auth), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["trend"], json!("no_data"));
    assert_eq!(body["data"]["total_entries"], json!(0));
}

#[tokio::test]
async fn update_and_delete_own_entry() {
    let (app, config) = app();
    let auth = bearer(&config, Uuid::new_v4());
    let created = create_entry(&app, &auth, 2, 2, 2).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/moods/{id}"),
            Some(&auth),
            Some(json!({ "mood": 5 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["mood"], json!(5));
    assert_eq!(body["data"]["stress"], json!(2));

    let (status, body) = send(
        &app,
        request(Method::DELETE, &format!("/api/moods/{id}"), Some(&auth), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = send(&app, request(Method::GET, "/api/moods", Some(&auth), None)).await;
    assert_eq!(body["pagination"]["total"], json!(0));
}

#[tokio::test]
async fn foreign_entries_are_not_found() {
    let (app, config) = app();
    let owner = bearer(&config, Uuid::new_v4());
    let stranger = bearer(&config, Uuid::new_v4());
    let created = create_entry(&app, &owner, 3, 3, 3).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/moods/{id}"),
            Some(&stranger),
            Some(json!({ "mood": 1 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/moods/{id}"),
            Some(&stranger),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the owner still sees the entry untouched
    let (_, body) = send(&app, request(Method::GET, "/api/moods", Some(&owner), None)).await;
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["data"][0]["mood"], json!(3));
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _) = app();

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["service"], json!("moodtrack-api"));

    let (status, body) = send(&app, request(Method::GET, "/readyz", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ready"));
}
