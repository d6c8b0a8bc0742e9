//! Application error types for robust error handling.

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Password hashing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

/// Authentication core failures. Kinds stay distinct for diagnostics and are
/// collapsed into a single unauthorized response by [`AppError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token signature does not verify")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token claims could not be parsed")]
    MalformedToken,

    #[error("Token carries no subject")]
    MissingSubject,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl AuthError {
    /// True for failures caused by the presented token itself.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::MalformedToken
                | AuthError::MissingSubject
        )
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "detail": message })),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized(AuthError::InvalidCredentials) => {
                debug!("rejected login: invalid credentials");
                return unauthorized("Incorrect username or password");
            }
            AppError::Unauthorized(kind) if kind.is_token_rejection() => {
                debug!(reason = %kind, "rejected bearer token");
                return unauthorized("Could not validate credentials");
            }
            AppError::Unauthorized(e) => {
                error!(error = %e, "authentication backend failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({ "detail": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
