//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use leasebid_core::clock::Clock;
use leasebid_test_support::FixedClock;
use leasebid_walkthrough::application::walkthrough::WalkthroughSettings;
use tower::ServiceExt;

use leasebid_api::state::{AppState, DEFAULT_MAX_SESSIONS};

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router with a deterministic clock and manual stepping.
pub fn build_test_app() -> Router {
    build_test_app_with(WalkthroughSettings::default())
}

/// Build the full app router with custom session defaults. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app_with(settings: WalkthroughSettings) -> Router {
    build_test_app_limited(settings, DEFAULT_MAX_SESSIONS)
}

/// Build the full app router keeping at most `max_sessions` live sessions.
pub fn build_test_app_limited(settings: WalkthroughSettings, max_sessions: usize) -> Router {
    leasebid_api::build_router(AppState::new(fixed_clock(), settings, max_sessions))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Create a walkthrough session and return its ID.
pub async fn create_walkthrough(app: &Router, body: serde_json::Value) -> String {
    let (status, json) = post_json(app, "/api/v1/walkthroughs", &body).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_owned()
}

/// Advance the paused clock by `ms` and let woken timers run.
pub async fn advance_ms(ms: u64) {
    tokio::time::advance(std::time::Duration::from_millis(ms)).await;
    leasebid_test_support::settle().await;
}
