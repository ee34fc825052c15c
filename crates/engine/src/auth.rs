//! Credential storage and verification.
//!
//! The system this replaces kept passwords in plaintext; that is treated
//! here as a defect, not a behavior to preserve. Stored credentials are
//! salted SHA-256 digests in the form `sha256$<salt-b64>$<digest-b64>`,
//! and login compares digests, never plaintext.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::RngCore;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use docket_storage::DocumentStore;

use crate::error::EngineError;

const COLLECTION: &str = "users";
const SALT_LEN: usize = 16;
const SCHEME: &str = "sha256";

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    format!("{SCHEME}${}${}", BASE64.encode(salt), digest(&salt, password))
}

/// Verify a password against a stored `sha256$<salt>$<digest>` hash.
///
/// Unparseable hashes verify as false rather than erroring: a corrupt
/// credential row must not let anyone in.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (scheme, salt_b64, expected) = match (parts.next(), parts.next(), parts.next()) {
        (Some(s), Some(salt), Some(d)) => (s, salt, d),
        _ => return false,
    };
    if scheme != SCHEME {
        return false;
    }
    let salt = match BASE64.decode(salt_b64) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    digest(&salt, password) == expected
}

/// User accounts backed by the `users` collection.
///
/// Documents are `{ "username": <string>, "password_hash": <string> }`.
pub struct Users<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Users<S> {
    pub fn new(store: Arc<S>) -> Self {
        Users { store }
    }

    /// Create a user, hashing the password before it is stored.
    pub async fn add(&self, username: &str, password: &str) -> Result<(), EngineError> {
        if username.trim().is_empty() {
            return Err(docket_core::ValidationError::MissingField {
                field: "username".to_string(),
            }
            .into());
        }
        let mut fields = Map::new();
        fields.insert(
            "username".to_string(),
            Value::String(username.to_string()),
        );
        fields.insert(
            "password_hash".to_string(),
            Value::String(hash_password(password)),
        );
        self.store.add_document(COLLECTION, fields).await?;
        tracing::info!(username, "user added");
        Ok(())
    }

    /// Check a username/password pair against the stored credentials.
    ///
    /// Unknown usernames and wrong passwords both return false; callers
    /// get no signal which one failed.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, EngineError> {
        let docs = self.store.list_documents(COLLECTION).await?;
        let user = docs
            .iter()
            .find(|d| d.field_str("username") == Some(username));
        Ok(match user.and_then(|d| d.field_str("password_hash")) {
            Some(stored) => verify_password(password, stored),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_storage::MemoryStore;

    #[test]
    fn hash_round_trips_and_never_stores_plaintext() {
        let stored = hash_password("s3cret");
        assert!(stored.starts_with("sha256$"));
        assert!(!stored.contains("s3cret"));
        assert!(verify_password("s3cret", &stored));
        assert!(!verify_password("guess", &stored));
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash_password("s3cret"), hash_password("s3cret"));
    }

    #[test]
    fn malformed_stored_hashes_never_verify() {
        assert!(!verify_password("s3cret", "s3cret"));
        assert!(!verify_password("s3cret", "md5$abc$def"));
        assert!(!verify_password("s3cret", "sha256$not-base64!$xyz"));
    }

    #[tokio::test]
    async fn authenticate_checks_hashed_credentials() {
        let users = Users::new(Arc::new(MemoryStore::new()));
        users.add("clerk1", "s3cret").await.unwrap();

        assert!(users.authenticate("clerk1", "s3cret").await.unwrap());
        assert!(!users.authenticate("clerk1", "wrong").await.unwrap());
        assert!(!users.authenticate("nobody", "s3cret").await.unwrap());
    }
}
