#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use seatwise_api::clock::Clock;
use seatwise_api::config::{LogFormat, ServerConfig};
use seatwise_api::router::build_app_router;
use seatwise_api::state::AppState;

/// Sunday 2025-06-01, 12:00 local time. Every request in these tests sees
/// this as "now".
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".parse().unwrap()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        database_max_connections: 5,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router, with the production middleware
/// stack, over the given pool and a pinned clock.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        clock: Clock::Fixed(test_now()),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a 400 carrying exactly `message`.
pub async fn assert_rejected(response: Response, message: &str) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], message);
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A valid reservation payload for Monday 2025-06-02 at 18:00.
pub fn reservation_payload() -> Value {
    json!({
        "first_name": "Rick",
        "last_name": "Sanchez",
        "mobile_number": "202-555-0164",
        "reservation_date": "2025-06-02",
        "reservation_time": "18:00",
        "people": 2,
    })
}

pub async fn create_reservation(pool: &PgPool, payload: Value) -> Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/reservations",
        json!({ "data": payload }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

pub async fn create_table(pool: &PgPool, name: &str, capacity: i64) -> Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/tables",
        json!({ "data": { "table_name": name, "capacity": capacity } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

pub async fn seat(pool: &PgPool, table_id: i64, reservation_id: i64) -> Response {
    put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/tables/{table_id}/seat"),
        json!({ "data": { "reservation_id": reservation_id } }),
    )
    .await
}
