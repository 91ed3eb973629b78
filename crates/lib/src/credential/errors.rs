//! Error types for the credential service.

use thiserror::Error;

use crate::Error;

/// Errors that can occur during registration and authentication.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Username already taken at registration time.
    #[error("Username already exists: {username}")]
    DuplicateUsername {
        /// The username that collided
        username: String,
    },

    /// Password shorter than the configured minimum.
    #[error("Password must be at least {min} characters long")]
    WeakPassword {
        /// Configured minimum length
        min: usize,
    },

    /// Username missing or blank after trimming.
    #[error("Username cannot be empty")]
    MissingUsername,

    /// Login failed.
    ///
    /// Deliberately undifferentiated: the same error is returned whether the
    /// username was unknown or the password was wrong, to avoid username
    /// enumeration.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("Password hashing failed: {reason}")]
    HashingFailed {
        /// Human-readable failure context
        reason: String,
    },
}

impl CredentialError {
    /// Check if this error indicates a username collision.
    pub fn is_duplicate_username(&self) -> bool {
        matches!(self, CredentialError::DuplicateUsername { .. })
    }

    /// Check if this error indicates a failed login attempt.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, CredentialError::InvalidCredentials)
    }

    /// Check if this error indicates the password was too short.
    pub fn is_weak_password(&self) -> bool {
        matches!(self, CredentialError::WeakPassword { .. })
    }

    /// Check if this error indicates the username was missing.
    pub fn is_missing_username(&self) -> bool {
        matches!(self, CredentialError::MissingUsername)
    }
}

// Conversion from CredentialError to the main Error type
impl From<CredentialError> for Error {
    fn from(err: CredentialError) -> Self {
        Error::Credential(err)
    }
}
