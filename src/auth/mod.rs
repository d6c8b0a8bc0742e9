//! Authentication: password hashing, session tokens, token endpoint.

mod handlers;
mod jwt;
mod password;

pub use handlers::{issue_token, TokenRequest, TokenResponse};
pub use jwt::{Claims, JwtCodec, TokenSettings, DEFAULT_TOKEN_TTL_MINUTES};
pub use password::PasswordHasher;
