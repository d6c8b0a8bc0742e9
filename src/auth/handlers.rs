//! Auth HTTP handlers: token issuance.

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;

/// OAuth2 password-grant style form.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /token
pub async fn issue_token(
    State(state): State<AppState>,
    Form(body): Form<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    // Argon2 is CPU-bound; keep it off the async workers so logins run in parallel.
    let service = state.auth_service().clone();
    let access_token = tokio::task::spawn_blocking(move || {
        service.login(&body.username, &body.password)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("login task: {}", e)))??;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
