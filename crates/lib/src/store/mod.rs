//! Persistence layer for snippets and credentials.
//!
//! Backends implement the [`RecordStore`] trait. Lookups are exact-match by
//! snippet id or username; the conditional update and the delete report how
//! many records were actually affected, mirroring document-store
//! matched/deleted counts.
//!
//! ## Available Backends
//!
//! - **Memory**: HashMaps behind a `tokio::sync::RwLock`, with JSON file
//!   persistence used on graceful shutdown.
//! - **SQLite** (feature: `sqlite`) / **PostgreSQL** (feature: `postgres`):
//!   relational storage through sqlx's `AnyPool`, see [`sql`].

mod errors;
pub mod memory;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

pub use errors::StoreError;
pub use memory::Memory;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub use sql::{DbKind, SqlxBackend};
#[cfg(feature = "sqlite")]
pub use sql::Sqlite;
#[cfg(feature = "postgres")]
pub use sql::Postgres;

use std::any::Any;

use async_trait::async_trait;

use crate::Result;
use crate::credential::Credential;
use crate::snippet::{Snippet, SnippetDraft, SnippetPatch};

/// Storage interface consumed by the request handlers and guards.
///
/// Single-record operations are atomic at the store layer; cross-record
/// transactions are out of scope. All operations are async and no operation
/// blocks the whole process.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All snippets, oldest first.
    async fn find_snippets(&self) -> Result<Vec<Snippet>>;

    /// Exact-match lookup by snippet id.
    async fn find_snippet(&self, id: &str) -> Result<Option<Snippet>>;

    /// Insert a new snippet. The store assigns the id and both timestamps.
    async fn insert_snippet(&self, draft: SnippetDraft) -> Result<Snippet>;

    /// Conditional write keyed by id and changed content.
    ///
    /// Returns the number of records actually modified: 0 when the record is
    /// absent or already matches the patch, 1 when the patch applied. The
    /// store bumps `updated_at` on a successful write.
    async fn update_snippet(&self, id: &str, patch: &SnippetPatch) -> Result<u64>;

    /// Delete by id. Returns the number of records deleted (0 or 1).
    async fn delete_snippet(&self, id: &str) -> Result<u64>;

    /// Exact-match lookup by username.
    async fn find_credential(&self, username: &str) -> Result<Option<Credential>>;

    /// Insert a credential.
    ///
    /// A username uniqueness violation surfaces as
    /// [`StoreError::DuplicateUsername`].
    async fn insert_credential(&self, credential: Credential) -> Result<()>;

    /// Downcasting support for backend-specific shutdown hooks.
    fn as_any(&self) -> &dyn Any;
}
