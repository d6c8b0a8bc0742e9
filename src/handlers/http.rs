//! HTTP handlers: greeting and health.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::middleware::AuthUser;
use crate::services::AuthService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(auth_service: AuthService) -> Self {
        Self { auth_service }
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }
}

/// GET /: greet the authenticated user.
pub async fn root(AuthUser(identity): AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "message": format!("Hello, {}!", identity.as_str()) }))
}

/// GET /health: liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
