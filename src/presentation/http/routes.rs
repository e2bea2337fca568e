//! Route Configuration
//!
//! Configures all HTTP routes for the forum server. Auth is an explicit
//! middleware chain ahead of the protected handlers, never ambient state.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, optional_auth_middleware};
use crate::presentation::middleware::metrics::track_http_metrics;
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/user", user_routes(state.clone()))
        .nest("/comment", comment_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_http_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// User routes: profile and avatar reads are public, everything else
/// requires authentication
fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/setting", get(handlers::user::get_setting))
        .route("/upload", post(handlers::user::upload_avatar))
        .route("/header/url", post(handlers::user::update_header_url))
        .route("/forgetPassword", post(handlers::user::change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public = Router::new()
        .route("/header/{file_name}", get(handlers::user::get_header))
        .route("/profile/{user_id}", get(handlers::user::get_profile))
        .route_layer(middleware::from_fn_with_state(
            state,
            optional_auth_middleware,
        ));

    protected.merge(public)
}

/// Comment routes (protected)
fn comment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/add/{discuss_post_id}",
            post(handlers::comment::add_comment),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
