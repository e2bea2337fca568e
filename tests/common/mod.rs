//! Common Test Utilities
//!
//! Shared helpers for exercising routers without a running server.
//! Endpoints that need PostgreSQL/Redis are covered by the service-level
//! unit tests with mocked repositories; these helpers drive the routes
//! that stand alone.

use axum::{body::Body, http::Request, Router};
use tower::ServiceExt;

/// Test application wrapper around a router
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Wrap an already-built router
    pub fn with_router(router: Router) -> Self {
        Self { router }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with a form-encoded body
    pub async fn post_form(&self, uri: &str, body: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Collect a response body into a string
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
