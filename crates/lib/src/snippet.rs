//! Snippet domain types and write-time validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Error;
use crate::constants::{VALUE_MAX_LEN, VALUE_MIN_LEN};

/// A stored snippet record.
///
/// Identity is the store-assigned `id` and is immutable after creation.
/// The owner is stamped once at creation from the acting session's identity
/// and is never changed by update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snippet {
    /// Store-assigned identifier (UUID string)
    pub id: String,

    /// Snippet text, 1..=42 characters
    pub value: String,

    /// Optional display title
    pub title: Option<String>,

    /// Username of the creating account, if any
    pub owner: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields handed to the store when creating a snippet.
///
/// The store assigns the id and both timestamps.
#[derive(Clone, Debug)]
pub struct SnippetDraft {
    pub title: Option<String>,
    pub value: String,
    pub owner: Option<String>,
}

/// Fields applied by the conditional update.
///
/// Owner and id are never patched; `updated_at` is bumped by the store
/// when the write actually modifies the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetPatch {
    pub title: String,
    pub value: String,
}

impl SnippetPatch {
    /// Whether applying this patch to `snippet` would change anything.
    pub fn changes(&self, snippet: &Snippet) -> bool {
        snippet.title.as_deref() != Some(self.title.as_str()) || snippet.value != self.value
    }
}

/// Raw form input for create/update, validated before it touches the store.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SnippetForm {
    pub title: String,
    pub value: String,
}

impl SnippetForm {
    /// Validate the form against the write-time rules.
    ///
    /// The title is required (non-blank after trimming) and the value length
    /// must satisfy `VALUE_MIN_LEN..=VALUE_MAX_LEN`, counted in characters.
    pub fn validate(&self) -> std::result::Result<SnippetPatch, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let len = self.value.chars().count();
        if !(VALUE_MIN_LEN..=VALUE_MAX_LEN).contains(&len) {
            return Err(ValidationError::ValueLength {
                actual: len,
                min: VALUE_MIN_LEN,
                max: VALUE_MAX_LEN,
            });
        }

        Ok(SnippetPatch {
            title: title.to_string(),
            value: self.value.clone(),
        })
    }
}

/// Errors produced by write-time validation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title field was missing or blank.
    #[error("A title is required")]
    MissingTitle,

    /// The snippet value length was out of bounds.
    #[error("The snippet must be {min} to {max} characters long (got {actual})")]
    ValueLength {
        /// Submitted length in characters
        actual: usize,
        /// Lower bound, inclusive
        min: usize,
        /// Upper bound, inclusive
        max: usize,
    },
}

// Conversion from ValidationError to the main Error type
impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}
