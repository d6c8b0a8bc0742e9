//! Business logic: login and request authentication.

pub mod auth;

pub use auth::AuthService;
