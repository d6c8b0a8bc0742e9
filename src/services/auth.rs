//! Login (credentials -> token) and per-request token authentication.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use crate::auth::{JwtCodec, PasswordHasher};
use crate::error::AuthError;
use crate::repositories::CredentialStore;

/// Argon2id PHC string with default parameters that no password matches.
/// Verified on unknown identities so both failure paths cost one hash.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Subject recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity(pub String);

impl AuthenticatedIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stateless: every call depends only on its inputs, the codec key and store reads.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    codec: JwtCodec,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, codec: JwtCodec, token_ttl: Duration) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            codec,
            token_ttl,
        }
    }

    /// Verify credentials and mint a token. Unknown identity and wrong
    /// password both yield `InvalidCredentials`.
    pub fn login(&self, identity: &str, password: &str) -> Result<String, AuthError> {
        let Some(record) = self.store.lookup(identity) else {
            let _ = self.hasher.verify(password, DUMMY_PASSWORD_HASH);
            debug!("login failed: unknown identity");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &record.password_hash)? {
            debug!("login failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.codec.encode(&record.identity, Some(self.token_ttl))?;
        info!(user = %record.identity, "issued access token");
        Ok(token)
    }

    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        self.codec
            .decode(token)
            .map(AuthenticatedIdentity)
            .inspect_err(|e| debug!(reason = %e, "token rejected"))
    }
}
