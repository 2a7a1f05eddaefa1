//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the quote entry wizard
//! - List/detail endpoints for properties and quotes
//! - Response types carrying the wizard's next-step decision

pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use quoin_core::underwriting::DebtPolicy;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Underwriting policy used for quote derivation.
    pub policy: DebtPolicy,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
