//! Health API Tests
//!
//! The basic health and liveness probes take no state, so they can be
//! exercised end-to-end without a database or Redis.

use axum::{http::StatusCode, routing::get, Router};

use forum_server::presentation::http::handlers::health;

use crate::common::{body_string, TestApp};

fn health_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
}

#[tokio::test]
async fn test_health_check_reports_healthy() {
    let app = TestApp::with_router(health_router());

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("\"status\":\"healthy\""));
    assert!(body.contains("\"version\""));
}

#[tokio::test]
async fn test_liveness_reports_alive() {
    let app = TestApp::with_router(health_router());

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("\"status\":\"alive\""));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::with_router(health_router());

    let response = app.get("/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
