//! # API Server
//!
//! Axum-based HTTP adapter for the review assignment service.
//!
//! ## Modules
//!
//! - [`dto`]: Request/response data transfer objects
//! - [`handlers`]: HTTP request handlers
//! - [`middleware`]: Request-id middleware
//! - [`router`]: API route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

use std::sync::Arc;

pub use router::create_app_router;

/// The concrete assignment service wired to Postgres.
pub type Service = service::AssignmentService<storage::PgTxManager>;

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// The assignment engine
    pub service: Arc<Service>,
}

impl AppState {
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
