//! # API Router Configuration
//!
//! Wires the public route table to the handlers and stacks the ambient
//! layers: request-id propagation, request tracing and the per-request
//! deadline.

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handlers, AppState};

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/pullRequest/create",
            post(handlers::pull_requests::create_pull_request_handler),
        )
        .route(
            "/pullRequest/merge",
            post(handlers::pull_requests::merge_pull_request_handler),
        )
        .route(
            "/pullRequest/reassign",
            post(handlers::pull_requests::reassign_pull_request_handler),
        )
        .route(
            "/pullRequest/safeReassign",
            post(handlers::pull_requests::safe_reassign_pull_request_handler),
        )
        .route("/team/add", post(handlers::teams::create_team_handler))
        .route("/team/get", get(handlers::teams::get_team_handler))
        .route(
            "/teams/:team_name/deactivate",
            post(handlers::teams::deactivate_team_handler),
        )
        .route("/users/getReview", get(handlers::users::get_review_handler))
        .route(
            "/users/setIsActive",
            post(handlers::users::set_is_active_handler),
        )
        .route("/stats", get(handlers::stats::get_stats_handler))
        .with_state(state)
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state holding the assignment service
/// * `request_timeout` - Per-request deadline; expiry answers 408 before
///   any business handler can reclassify it
pub fn create_app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
        .layer(middleware::from_fn(crate::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
