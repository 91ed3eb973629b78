//! Credential management: registration and authentication.
//!
//! Passwords are hashed with Argon2id inside [`CredentialService::register`]
//! - hashing is an explicit step before the store insert, not a save hook,
//! so the ordering is visible and testable. Plaintext passwords are never
//! persisted or logged.

pub mod crypto;
mod errors;

pub use errors::CredentialError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::constants::DEFAULT_MIN_PASSWORD_LEN;
use crate::store::RecordStore;

/// A registered account.
///
/// The username is the natural key; uniqueness is enforced by the store.
/// `password_hash` is an Argon2id PHC string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credential {
    /// Unique username (login identifier, trimmed)
    pub username: String,

    /// Password hash (Argon2id, PHC format)
    pub password_hash: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Verifies username/password pairs against stored password hashes.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn RecordStore>,
    min_password_len: usize,
}

impl CredentialService {
    /// Create a service with the default minimum password length.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_min_password_len(store, DEFAULT_MIN_PASSWORD_LEN)
    }

    /// Create a service with a configured minimum password length.
    pub fn with_min_password_len(store: Arc<dyn RecordStore>, min_password_len: usize) -> Self {
        Self {
            store,
            min_password_len,
        }
    }

    /// The configured minimum password length.
    pub fn min_password_len(&self) -> usize {
        self.min_password_len
    }

    /// Register a new account.
    ///
    /// Rejects blank usernames, passwords shorter than the configured
    /// minimum, and usernames already present in the store (the store-level
    /// uniqueness violation surfaces as `DuplicateUsername`). On success the
    /// hash is stored, never the plaintext.
    pub async fn register(&self, username: &str, password: &str) -> Result<Credential> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CredentialError::MissingUsername.into());
        }
        if password.chars().count() < self.min_password_len {
            return Err(CredentialError::WeakPassword {
                min: self.min_password_len,
            }
            .into());
        }

        // Hash before the insert so the plaintext never reaches the store.
        let password_hash = crypto::hash_password(password)?;
        let credential = Credential {
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        match self.store.insert_credential(credential.clone()).await {
            Ok(()) => {
                tracing::info!("Created new user: {}", username);
                Ok(credential)
            }
            Err(e) if e.is_duplicate_username() => Err(CredentialError::DuplicateUsername {
                username: username.to_string(),
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    /// Authenticate a username/password pair.
    ///
    /// Returns the canonical identity (the stored username) on success.
    /// An unknown username and a wrong password both fail with the same
    /// `InvalidCredentials` error, and nothing is mutated on failure.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String> {
        let username = username.trim();

        let Some(credential) = self.store.find_credential(username).await? else {
            return Err(CredentialError::InvalidCredentials.into());
        };

        crypto::verify_password(password, &credential.password_hash)?;

        tracing::debug!("Authenticated user: {}", credential.username);
        Ok(credential.username)
    }
}
