//!
//! Snipboard: a server-rendered manager for short text snippets.
//! This library provides the domain layer behind the Snipboard web binary.
//!
//! ## Core Concepts
//!
//! * **Snippets (`snippet::Snippet`)**: Short text records (1..=42 chars) with an
//!   optional title and an owner stamped at creation time.
//! * **Record Store (`store::RecordStore`)**: A pluggable persistence layer for
//!   snippets and credentials, with in-memory and SQL backends.
//! * **Credential Service (`credential::CredentialService`)**: Registration and
//!   login against Argon2id password hashes.
//! * **Sessions (`session::SessionStore`)**: Per-visitor server-side session state
//!   with regenerate/destroy lifecycle and one-shot flash messages.
//! * **Guards (`guard`)**: Pre-handler authentication and ownership checks that
//!   short-circuit request processing before any store mutation.
//! * **Handlers (`handlers`)**: The list/create/show/edit/update/remove/delete
//!   operations, expressed as `Reply` values (a named view payload or a redirect)
//!   that the binary maps onto HTTP.

pub mod constants;
pub mod credential;
pub mod guard;
pub mod handlers;
pub mod session;
pub mod snippet;
pub mod store;

/// Re-export the `Snippet` struct for easier access.
pub use snippet::Snippet;

/// Result type used throughout the Snipboard library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Snipboard library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured credential errors from the credential module
    #[error(transparent)]
    Credential(credential::CredentialError),

    /// Structured guard errors from the guard module
    #[error(transparent)]
    Guard(guard::GuardError),

    /// Structured validation errors from the snippet module
    #[error(transparent)]
    Validation(snippet::ValidationError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::Credential(_) => "credential",
            Error::Guard(_) => "guard",
            Error::Validation(_) => "snippet",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_not_found(),
            Error::Guard(guard_err) => guard_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates the visitor is not logged in.
    pub fn is_not_authenticated(&self) -> bool {
        match self {
            Error::Guard(guard_err) => guard_err.is_not_authenticated(),
            _ => false,
        }
    }

    /// Check if this error indicates an ownership check rejected the request.
    pub fn is_forbidden(&self) -> bool {
        match self {
            Error::Guard(guard_err) => guard_err.is_forbidden(),
            _ => false,
        }
    }

    /// Check if this error indicates a username collision.
    pub fn is_duplicate_username(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_duplicate_username(),
            Error::Credential(cred_err) => cred_err.is_duplicate_username(),
            _ => false,
        }
    }

    /// Check if this error indicates a failed login attempt.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Error::Credential(cred_err) => cred_err.is_invalid_credentials(),
            _ => false,
        }
    }

    /// Check if this error is validation-related.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Validation(_) => true,
            Error::Credential(cred_err) => {
                cred_err.is_weak_password() || cred_err.is_missing_username()
            }
            _ => false,
        }
    }

    /// Check if this error indicates the backing store was unavailable.
    pub fn is_store_unavailable(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_unavailable(),
            _ => false,
        }
    }
}
