//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use docengine_shared::{AppConfig, Environment, JwtConfig, JwtService};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Deployment environment, gates the developer routes.
    pub environment: Environment,
}

impl AppState {
    /// Builds the state from loaded configuration and an open pool.
    #[must_use]
    pub fn new(config: &AppConfig, db: DatabaseConnection) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(JwtService::new(JwtConfig::from_settings(&config.jwt))),
            environment: config.environment,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    routes::api_routes_with_state(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
