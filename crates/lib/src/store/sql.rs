//! SQL-based record store implementations.
//!
//! ## Available Backends
//!
//! - **SQLite** (feature: `sqlite`): embedded database
//! - **PostgreSQL** (feature: `postgres`): PostgreSQL database
//!
//! The backend uses sqlx with `AnyPool` for multi-database support. The
//! schema is created on connect; the DDL is written to be valid in both
//! dialects, so there is no per-dialect migration layer.

use std::any::Any;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use crate::Result;
use crate::credential::Credential;
use crate::snippet::{Snippet, SnippetDraft, SnippetPatch};
use crate::store::{RecordStore, StoreError};

/// Extension trait for sqlx Result types to simplify error handling.
///
/// Similar to `anyhow::Context`, this trait adds a method to convert
/// sqlx errors to `StoreError::Unavailable` with a context message.
pub(crate) trait SqlxResultExt<T> {
    /// Convert sqlx error to StoreError with context message.
    fn sql_context(self, context: &str) -> Result<T>;
}

impl<T> SqlxResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn sql_context(self, context: &str) -> Result<T> {
        self.map_err(|e| {
            StoreError::Unavailable {
                reason: format!("{context}: {e}"),
            }
            .into()
        })
    }
}

/// Database backend kind for SQL dialect selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// SQLite database
    Sqlite,
    /// PostgreSQL database
    Postgres,
}

/// SQL-based record store implementing [`RecordStore`] using sqlx.
///
/// Supports both SQLite and PostgreSQL through sqlx's `AnyPool`. The
/// underlying pool handles connection pooling and thread safety.
pub struct SqlxBackend {
    pool: AnyPool,
    kind: DbKind,
}

impl SqlxBackend {
    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Get the database kind.
    pub fn kind(&self) -> DbKind {
        self.kind
    }

    /// Check if this backend is using SQLite.
    pub fn is_sqlite(&self) -> bool {
        self.kind == DbKind::Sqlite
    }

    /// Check if this backend is using PostgreSQL.
    pub fn is_postgres(&self) -> bool {
        self.kind == DbKind::Postgres
    }
}

// SQLite-specific implementations
#[cfg(feature = "sqlite")]
impl SqlxBackend {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the database file and schema if they don't exist.
    pub async fn open_sqlite<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        // mode=rwc: read-write-create (create file if it doesn't exist)
        let url = format!("sqlite:{}?mode=rwc", path.as_ref().display());
        Self::connect_sqlite(&url).await
    }

    /// Connect to a SQLite database using a connection URL.
    pub async fn connect_sqlite(url: &str) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let is_in_memory = url.contains("mode=memory");

        // For SQLite in-memory databases with shared cache, prevent all
        // connections from being closed. When the last connection closes,
        // the in-memory database is destroyed and all data is lost.
        let pool = if is_in_memory {
            AnyPoolOptions::new()
                .max_connections(5)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(url)
                .await
                .sql_context("Failed to connect to SQLite")?
        } else {
            AnyPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .sql_context("Failed to connect to SQLite")?
        };

        if is_in_memory {
            sqlx::query("PRAGMA busy_timeout = 5000;")
                .execute(&pool)
                .await
                .sql_context("Failed to configure SQLite")?;
        } else {
            // journal_mode=WAL: Write-Ahead Logging for better concurrency
            // synchronous=NORMAL: balanced durability (safe with WAL)
            // busy_timeout=5000: wait up to 5s for locks before failing
            sqlx::query(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )
            .execute(&pool)
            .await
            .sql_context("Failed to configure SQLite")?;
        }

        let backend = Self {
            pool,
            kind: DbKind::Sqlite,
        };

        backend.initialize_schema().await?;

        Ok(backend)
    }

    /// Create an in-memory SQLite database.
    ///
    /// The database exists only for the lifetime of this backend instance.
    /// Useful for testing.
    pub async fn sqlite_in_memory() -> Result<Self> {
        // Shared cache mode so all pool connections see the same database,
        // with a unique name per instance to avoid sharing between tests.
        let unique_id = uuid::Uuid::new_v4();
        let url = format!("sqlite:file:mem_{unique_id}?mode=memory&cache=shared");
        Self::connect_sqlite(&url).await
    }
}

// PostgreSQL-specific implementations
#[cfg(feature = "postgres")]
impl SqlxBackend {
    /// Connect to a PostgreSQL database using a connection URL.
    pub async fn connect_postgres(url: &str) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .sql_context("Failed to connect to PostgreSQL")?;

        let backend = Self {
            pool,
            kind: DbKind::Postgres,
        };

        backend.initialize_schema().await?;

        Ok(backend)
    }
}

impl SqlxBackend {
    /// Create the tables if they don't exist.
    ///
    /// The DDL below is valid in both SQLite and PostgreSQL.
    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS snippets (
                 id TEXT PRIMARY KEY,
                 value TEXT NOT NULL,
                 title TEXT,
                 owner TEXT,
                 created_at TEXT NOT NULL,
                 updated_at TEXT NOT NULL
             )",
        )
        .execute(&self.pool)
        .await
        .sql_context("Failed to create snippets table")?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS credentials (
                 username TEXT PRIMARY KEY,
                 password_hash TEXT NOT NULL,
                 created_at TEXT NOT NULL
             )",
        )
        .execute(&self.pool)
        .await
        .sql_context("Failed to create credentials table")?;

        Ok(())
    }
}

/// Row shape shared by the snippet queries.
type SnippetRow = (String, String, Option<String>, Option<String>, String, String);

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StoreError::Unavailable {
                reason: format!("Invalid timestamp in row: {e}"),
            }
            .into()
        })
}

fn snippet_from_row(row: SnippetRow) -> Result<Snippet> {
    let (id, value, title, owner, created_at, updated_at) = row;
    Ok(Snippet {
        id,
        value,
        title,
        owner,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl RecordStore for SqlxBackend {
    async fn find_snippets(&self) -> Result<Vec<Snippet>> {
        let rows: Vec<SnippetRow> = sqlx::query_as(
            "SELECT id, value, title, owner, created_at, updated_at
             FROM snippets ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .sql_context("Failed to list snippets")?;

        rows.into_iter().map(snippet_from_row).collect()
    }

    async fn find_snippet(&self, id: &str) -> Result<Option<Snippet>> {
        let row: Option<SnippetRow> = sqlx::query_as(
            "SELECT id, value, title, owner, created_at, updated_at
             FROM snippets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .sql_context("Failed to get snippet")?;

        row.map(snippet_from_row).transpose()
    }

    async fn insert_snippet(&self, draft: SnippetDraft) -> Result<Snippet> {
        let now = Utc::now();
        let snippet = Snippet {
            id: uuid::Uuid::new_v4().to_string(),
            value: draft.value,
            title: draft.title,
            owner: draft.owner,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO snippets (id, value, title, owner, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&snippet.id)
        .bind(&snippet.value)
        .bind(&snippet.title)
        .bind(&snippet.owner)
        .bind(snippet.created_at.to_rfc3339())
        .bind(snippet.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .sql_context("Failed to insert snippet")?;

        Ok(snippet)
    }

    async fn update_snippet(&self, id: &str, patch: &SnippetPatch) -> Result<u64> {
        // Conditional write: only rows whose content differs from the patch
        // match, so an absent id and an already-identical record both report
        // zero modifications.
        let result = sqlx::query(
            "UPDATE snippets SET title = $2, value = $3, updated_at = $4
             WHERE id = $1 AND (value <> $3 OR COALESCE(title, '') <> $2)",
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .sql_context("Failed to update snippet")?;

        Ok(result.rows_affected())
    }

    async fn delete_snippet(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .sql_context("Failed to delete snippet")?;

        Ok(result.rows_affected())
    }

    async fn find_credential(&self, username: &str) -> Result<Option<Credential>> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT username, password_hash, created_at
             FROM credentials WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .sql_context("Failed to get credential")?;

        match row {
            Some((username, password_hash, created_at)) => Ok(Some(Credential {
                username,
                password_hash,
                created_at: parse_timestamp(&created_at)?,
            })),
            None => Ok(None),
        }
    }

    async fn insert_credential(&self, credential: Credential) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO credentials (username, password_hash, created_at)
             VALUES ($1, $2, $3)",
        )
        .bind(&credential.username)
        .bind(&credential.password_hash)
        .bind(credential.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation =>
            {
                Err(StoreError::DuplicateUsername {
                    username: credential.username,
                }
                .into())
            }
            Err(e) => Err(e).sql_context("Failed to insert credential"),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "sqlite")]
/// Convenience type alias for SQLite backend using sqlx.
pub type Sqlite = SqlxBackend;

#[cfg(feature = "postgres")]
/// Convenience type alias for PostgreSQL backend using sqlx.
pub type Postgres = SqlxBackend;
