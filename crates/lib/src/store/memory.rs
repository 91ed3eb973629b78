//! In-memory record store with JSON file persistence.
//!
//! All records live in HashMaps behind a single `RwLock`, so every trait
//! operation is one lock acquisition and per-record atomicity holds
//! trivially. The whole store can be saved to and loaded from a JSON file,
//! which the server uses on graceful shutdown.

use std::any::Any;
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::Result;
use crate::credential::Credential;
use crate::snippet::{Snippet, SnippetDraft, SnippetPatch};
use crate::store::{RecordStore, StoreError};

/// Serializable store contents.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Records {
    snippets: HashMap<String, Snippet>,
    credentials: HashMap<String, Credential>,
}

/// In-memory implementation of [`RecordStore`].
#[derive(Debug, Default)]
pub struct Memory {
    records: RwLock<Records>,
}

impl Memory {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load store contents from a JSON file.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        let records: Records = serde_json::from_str(&json)
            .map_err(|e| StoreError::DeserializationFailed { source: e })?;
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Save store contents to a JSON file.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let records = self.records.read().await;
        let json = serde_json::to_string_pretty(&*records)
            .map_err(|e| StoreError::SerializationFailed { source: e })?;
        drop(records);
        tokio::fs::write(path.as_ref(), json).await?;
        Ok(())
    }

    /// Number of stored snippets (for diagnostics).
    pub async fn snippet_count(&self) -> usize {
        self.records.read().await.snippets.len()
    }
}

#[async_trait]
impl RecordStore for Memory {
    async fn find_snippets(&self) -> Result<Vec<Snippet>> {
        let records = self.records.read().await;
        let mut snippets: Vec<Snippet> = records.snippets.values().cloned().collect();
        snippets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(snippets)
    }

    async fn find_snippet(&self, id: &str) -> Result<Option<Snippet>> {
        let records = self.records.read().await;
        Ok(records.snippets.get(id).cloned())
    }

    async fn insert_snippet(&self, draft: SnippetDraft) -> Result<Snippet> {
        let now = Utc::now();
        let snippet = Snippet {
            id: Uuid::new_v4().to_string(),
            value: draft.value,
            title: draft.title,
            owner: draft.owner,
            created_at: now,
            updated_at: now,
        };

        let mut records = self.records.write().await;
        records
            .snippets
            .insert(snippet.id.clone(), snippet.clone());
        Ok(snippet)
    }

    async fn update_snippet(&self, id: &str, patch: &SnippetPatch) -> Result<u64> {
        let mut records = self.records.write().await;
        let Some(snippet) = records.snippets.get_mut(id) else {
            return Ok(0);
        };
        if !patch.changes(snippet) {
            return Ok(0);
        }

        snippet.title = Some(patch.title.clone());
        snippet.value = patch.value.clone();
        snippet.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_snippet(&self, id: &str) -> Result<u64> {
        let mut records = self.records.write().await;
        Ok(records.snippets.remove(id).map_or(0, |_| 1))
    }

    async fn find_credential(&self, username: &str) -> Result<Option<Credential>> {
        let records = self.records.read().await;
        Ok(records.credentials.get(username).cloned())
    }

    async fn insert_credential(&self, credential: Credential) -> Result<()> {
        let mut records = self.records.write().await;
        if records.credentials.contains_key(&credential.username) {
            return Err(StoreError::DuplicateUsername {
                username: credential.username,
            }
            .into());
        }
        records
            .credentials
            .insert(credential.username.clone(), credential);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
