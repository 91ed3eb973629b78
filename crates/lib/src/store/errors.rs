//! Error types for the record store.

use thiserror::Error;

use crate::Error;

/// Errors that can occur during record store operations.
///
/// Helper methods like `is_*()` provide stable classification for callers
/// that need to map store failures onto user-facing outcomes.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snippet not found by id.
    #[error("Snippet not found: {id}")]
    SnippetNotFound {
        /// The id of the snippet that was not found
        id: String,
    },

    /// Username uniqueness was violated on insert.
    #[error("Username already exists: {username}")]
    DuplicateUsername {
        /// The username that collided
        username: String,
    },

    /// The backing store could not be reached or rejected the operation.
    ///
    /// The reason string carries the driver error context.
    #[error("Store unavailable: {reason}")]
    Unavailable {
        /// Human-readable failure context
        reason: String,
    },

    /// Store contents could not be serialized for persistence.
    #[error("Failed to serialize store contents")]
    SerializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// Persisted store contents could not be deserialized.
    #[error("Failed to deserialize store contents")]
    DeserializationFailed {
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Check if this error indicates a record was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::SnippetNotFound { .. })
    }

    /// Check if this error indicates a username collision.
    pub fn is_duplicate_username(&self) -> bool {
        matches!(self, StoreError::DuplicateUsername { .. })
    }

    /// Check if this error indicates the store was unavailable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}
