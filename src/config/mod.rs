//! Application configuration loaded from environment.

use std::net::SocketAddr;
use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;

use crate::auth::TokenSettings;

const DEFAULT_SECRET_KEY: &str = "your-secret-key-here";

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:8000`).
    pub server_addr: SocketAddr,
    /// Symmetric key used to sign and verify access tokens.
    pub secret_key: String,
    /// HMAC signing algorithm (`HS256`, `HS384` or `HS512`).
    pub algorithm: Algorithm,
    /// Lifetime of issued access tokens (`ACCESS_TOKEN_EXPIRE_MINUTES`).
    pub token_ttl: Duration,
    /// Account seeded into the in-memory credential store.
    pub demo_username: String,
    pub demo_password: String,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_addr: SocketAddr = var("SERVER_ADDR", "0.0.0.0:8000")
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let secret_key = var("SECRET_KEY", DEFAULT_SECRET_KEY);
        if secret_key.is_empty() {
            return Err(ConfigLoadError::EmptySecret);
        }

        let algorithm_name = var("ALGORITHM", "HS256");
        let algorithm = Algorithm::from_str(&algorithm_name)
            .ok()
            .filter(|alg| matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512))
            .ok_or(ConfigLoadError::UnsupportedAlgorithm(algorithm_name))?;

        // Expiry must stay representable as a timestamp for every token issued.
        let token_ttl = var("ACCESS_TOKEN_EXPIRE_MINUTES", "30")
            .parse::<i64>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .and_then(Duration::try_minutes)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(ConfigLoadError::InvalidTokenLifetime)?;

        Ok(Self {
            server_addr,
            secret_key,
            algorithm,
            token_ttl,
            demo_username: var("DEMO_USERNAME", "testuser"),
            demo_password: var("DEMO_PASSWORD", "password123"),
            log_level: var("LOG_LEVEL", "info"),
        })
    }

    /// Signing configuration handed to the token codec.
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings::new(self.secret_key.as_bytes(), self.algorithm)
            .with_default_ttl(self.token_ttl)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("SECRET_KEY must not be empty")]
    EmptySecret,
    #[error("Unsupported ALGORITHM {0}: expected HS256, HS384 or HS512")]
    UnsupportedAlgorithm(String),
    #[error("ACCESS_TOKEN_EXPIRE_MINUTES must be a positive integer")]
    InvalidTokenLifetime,
}
