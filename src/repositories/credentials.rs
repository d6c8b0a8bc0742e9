//! Credential store: identity -> password hash lookups.

use std::collections::HashMap;

use crate::auth::PasswordHasher;
use crate::error::PasswordError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub identity: String,
    /// PHC-format hash produced by [`PasswordHasher`].
    pub password_hash: String,
}

/// Read-only lookup capability the auth service depends on.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, identity: &str) -> Option<CredentialRecord>;
}

/// Store populated once at startup and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: HashMap<String, CredentialRecord>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: CredentialRecord) {
        self.records.insert(record.identity.clone(), record);
    }

    /// Provision `identity` by hashing `password` now.
    pub fn with_password(mut self, identity: &str, password: &str) -> Result<Self, PasswordError> {
        let password_hash = PasswordHasher::new().hash(password)?;
        self.insert(CredentialRecord {
            identity: identity.to_string(),
            password_hash,
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn lookup(&self, identity: &str) -> Option<CredentialRecord> {
        self.records.get(identity).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_provisioned_identity() {
        let store = InMemoryCredentialStore::new()
            .with_password("testuser", "password123")
            .unwrap();
        let record = store.lookup("testuser").unwrap();
        assert_eq!(record.identity, "testuser");
        assert!(PasswordHasher::new()
            .verify("password123", &record.password_hash)
            .unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookup_misses_unknown_identity() {
        let store = InMemoryCredentialStore::new();
        assert!(store.is_empty());
        assert!(store.lookup("nouser").is_none());
    }

    #[test]
    fn insert_replaces_existing_record() {
        let mut store = InMemoryCredentialStore::new();
        for hash in ["$argon2id$first", "$argon2id$second"] {
            store.insert(CredentialRecord {
                identity: "testuser".to_string(),
                password_hash: hash.to_string(),
            });
        }
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.lookup("testuser").unwrap().password_hash,
            "$argon2id$second"
        );
    }
}
