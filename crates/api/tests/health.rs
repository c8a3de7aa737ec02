//! Tests for the health endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app};

#[tokio::test]
async fn health_check_reports_store_health() {
    let app = build_test_app().await;
    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app().await;
    let response = app.get("/this-route-does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = build_test_app().await;
    let response = app.get("/health", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}
