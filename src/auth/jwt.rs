//! Signed, expiring session tokens (JWT, HMAC family).

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Lifetime applied when neither the caller nor the settings pick one.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Immutable signing configuration: key, algorithm and default lifetime.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Vec<u8>,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenSettings {
    pub fn new(secret: impl Into<Vec<u8>>, algorithm: Algorithm) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            default_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// Issues and validates session tokens with one process-wide key.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtCodec {
    pub fn new(settings: TokenSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&settings.secret),
            decoding_key: DecodingKey::from_secret(&settings.secret),
            algorithm: settings.algorithm(),
            default_ttl: settings.default_ttl(),
        }
    }

    pub fn encode(&self, subject: &str, ttl: Option<Duration>) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .ok_or_else(|| AuthError::Encoding("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: exp.timestamp(),
            iat: Some(now.timestamp()),
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Verify signature and expiry, then return the subject.
    pub fn decode(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
                _ => AuthError::InvalidSignature,
            }
        })?;

        // jsonwebtoken only rejects `exp < now`; a token is dead from its expiry instant on.
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(AuthError::Expired);
        }

        data.claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(AuthError::MissingSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    const SECRET: &[u8] = b"test-jwt-secret-min-32-chars!!";

    fn codec() -> JwtCodec {
        JwtCodec::new(TokenSettings::new(SECRET, Algorithm::HS256))
    }

    fn signed(claims: &serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_returns_subject() {
        let codec = codec();
        let token = codec.encode("testuser", Some(Duration::minutes(5))).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), "testuser");
    }

    #[test]
    fn default_ttl_is_fifteen_minutes() {
        let codec = codec();
        let token = codec.encode("testuser", None).unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(SECRET), &validation)
            .unwrap()
            .claims;
        assert_eq!(claims.exp - claims.iat.unwrap(), 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let token = codec.encode("testuser", Some(Duration::seconds(-30))).unwrap();
        assert_eq!(codec.decode(&token), Err(AuthError::Expired));
    }

    #[test]
    fn token_is_dead_at_its_expiry_instant() {
        let codec = codec();
        let token = codec.encode("testuser", Some(Duration::zero())).unwrap();
        assert_eq!(codec.decode(&token), Err(AuthError::Expired));
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        let result = codec().encode("testuser", Some(Duration::MAX));
        assert!(matches!(result, Err(AuthError::Encoding(_))));
        let huge = Duration::try_minutes(200_000_000_000).unwrap();
        assert!(matches!(
            codec().encode("testuser", Some(huge)),
            Err(AuthError::Encoding(_))
        ));
    }

    #[test]
    fn wrong_key_fails_signature() {
        let other = JwtCodec::new(TokenSettings::new(
            b"another-secret-also-32-chars-long".to_vec(),
            Algorithm::HS256,
        ));
        let token = other.encode("testuser", None).unwrap();
        assert_eq!(codec().decode(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn wrong_algorithm_fails_signature() {
        let settings = TokenSettings::new(SECRET, Algorithm::HS512);
        assert_eq!(settings.algorithm(), Algorithm::HS512);
        let hs512 = JwtCodec::new(settings);
        let token = hs512.encode("testuser", None).unwrap();
        assert_eq!(codec().decode(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.encode("testuser", None).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(br#"{"sub":"admin","exp":9999999999}"#);
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);
        assert!(matches!(
            codec.decode(&tampered),
            Err(AuthError::InvalidSignature | AuthError::MalformedToken)
        ));
    }

    #[test]
    fn garbage_and_empty_tokens_are_rejected() {
        let codec = codec();
        for token in ["", "garbage", "invalid.token.here"] {
            let err = codec.decode(token).unwrap_err();
            assert!(err.is_token_rejection(), "{token:?} gave {err:?}");
        }
    }

    #[test]
    fn missing_subject_is_reported() {
        let exp = Utc::now().timestamp() + 600;
        let token = signed(&serde_json::json!({ "exp": exp }));
        assert_eq!(codec().decode(&token), Err(AuthError::MissingSubject));
    }

    #[test]
    fn missing_expiry_is_malformed() {
        let token = signed(&serde_json::json!({ "sub": "testuser" }));
        assert_eq!(codec().decode(&token), Err(AuthError::MalformedToken));
    }
}
