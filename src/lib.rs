//! Minimal bearer-token authenticated HTTP API.
//!
//! Verifies credentials against a pluggable credential store, issues
//! stateless HMAC-signed JWTs and gates endpoints on their validity.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use error::{AppError, AuthError};
pub use handlers::http::AppState;
pub use services::AuthService;

use axum::routing::{get, post};
use handlers::http;
use tower_http::trace::TraceLayer;

/// Build the API router (token, greeting, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/token", post(auth::issue_token))
        .route("/", get(http::root))
        .route("/health", get(http::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
