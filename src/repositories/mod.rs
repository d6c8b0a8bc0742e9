//! Storage adapters behind the credential lookup trait.

pub mod credentials;

pub use credentials::{CredentialRecord, CredentialStore, InMemoryCredentialStore};
