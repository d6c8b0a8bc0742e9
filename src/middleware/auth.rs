//! Auth extractor: authenticated identity from a bearer token.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::{AppError, AuthError};
use crate::handlers::http::AppState;
use crate::services::auth::AuthenticatedIdentity;

/// Extractor: rejects with 401 unless `Authorization: Bearer <token>` verifies.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedIdentity);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized(AuthError::MalformedToken))?;
        let identity = state.auth_service().authenticate(bearer.token())?;
        Ok(AuthUser(identity))
    }
}
