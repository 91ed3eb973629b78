//! Tests for the RecordStore trait and its backends.

use chrono::Utc;
use snipboard::credential::Credential;
use snipboard::snippet::{SnippetDraft, SnippetPatch};

use crate::helpers::*;

#[tokio::test]
async fn test_find_snippets_returns_oldest_first() {
    let store = memory_store();

    let first = seed_snippet(store.as_ref(), "alice", "one").await;
    let second = seed_snippet(store.as_ref(), "alice", "two").await;

    let snippets = store.find_snippets().await.unwrap();
    assert_eq!(snippets.len(), 2);

    let first_pos = snippets.iter().position(|s| s.id == first.id).unwrap();
    let second_pos = snippets.iter().position(|s| s.id == second.id).unwrap();
    assert!(first_pos < second_pos);
}

#[tokio::test]
async fn test_insert_assigns_distinct_ids() {
    let store = memory_store();

    let a = seed_snippet(store.as_ref(), "alice", "one").await;
    let b = seed_snippet(store.as_ref(), "alice", "one").await;

    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_conditional_update_through_trait_object() {
    let store = memory_store();
    let snippet = seed_snippet(store.as_ref(), "alice", "hi").await;

    // Identical content: zero rows modified
    let identical = SnippetPatch {
        title: "seed".to_string(),
        value: "hi".to_string(),
    };
    assert_eq!(store.update_snippet(&snippet.id, &identical).await.unwrap(), 0);

    // Changed content: one row modified, updated_at bumped
    let changed = SnippetPatch {
        title: "seed".to_string(),
        value: "ho".to_string(),
    };
    assert_eq!(store.update_snippet(&snippet.id, &changed).await.unwrap(), 1);

    let stored = store.find_snippet(&snippet.id).await.unwrap().unwrap();
    assert_eq!(stored.value, "ho");
    assert!(stored.updated_at >= stored.created_at);
}

#[tokio::test]
async fn test_update_never_touches_owner_or_id() {
    let store = memory_store();
    let snippet = seed_snippet(store.as_ref(), "alice", "hi").await;

    let patch = SnippetPatch {
        title: "new title".to_string(),
        value: "ho".to_string(),
    };
    store.update_snippet(&snippet.id, &patch).await.unwrap();

    let stored = store.find_snippet(&snippet.id).await.unwrap().unwrap();
    assert_eq!(stored.id, snippet.id);
    assert_eq!(stored.owner.as_deref(), Some("alice"));
    assert_eq!(stored.created_at, snippet.created_at);
}

#[tokio::test]
async fn test_delete_counts() {
    let store = memory_store();
    let snippet = seed_snippet(store.as_ref(), "alice", "hi").await;

    assert_eq!(store.delete_snippet(&snippet.id).await.unwrap(), 1);
    assert_eq!(store.delete_snippet(&snippet.id).await.unwrap(), 0);
    assert_eq!(store.delete_snippet("never-existed").await.unwrap(), 0);
}

#[tokio::test]
async fn test_credential_uniqueness_is_store_enforced() {
    let store = memory_store();

    let credential = Credential {
        username: "alice".to_string(),
        password_hash: "$argon2id$fake-hash".to_string(),
        created_at: Utc::now(),
    };

    store.insert_credential(credential.clone()).await.unwrap();

    let err = store.insert_credential(credential).await.unwrap_err();
    assert!(err.is_duplicate_username());

    // The original record is untouched
    let stored = store.find_credential("alice").await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "$argon2id$fake-hash");
}

#[tokio::test]
async fn test_draft_without_owner_is_allowed() {
    let store = memory_store();

    let snippet = store
        .insert_snippet(SnippetDraft {
            title: None,
            value: "anon".to_string(),
            owner: None,
        })
        .await
        .unwrap();

    assert_eq!(snippet.owner, None);
    assert_eq!(snippet.title, None);
}

// ============================================================================
// SQL backend (SQLite in-memory)
// ============================================================================

#[cfg(feature = "sqlite")]
mod sql {
    use chrono::Utc;
    use snipboard::credential::Credential;
    use snipboard::snippet::SnippetPatch;
    use snipboard::store::{RecordStore, SqlxBackend};

    use crate::helpers::seed_snippet;

    async fn sqlite_store() -> SqlxBackend {
        SqlxBackend::sqlite_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_insert_and_find_round_trip() {
        let store = sqlite_store().await;

        let snippet = seed_snippet(&store, "alice", "hi").await;

        let found = store.find_snippet(&snippet.id).await.unwrap().unwrap();
        assert_eq!(found.value, "hi");
        assert_eq!(found.title.as_deref(), Some("seed"));
        assert_eq!(found.owner.as_deref(), Some("alice"));

        let all = store.find_snippets().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_conditional_update() {
        let store = sqlite_store().await;
        let snippet = seed_snippet(&store, "alice", "hi").await;

        let identical = SnippetPatch {
            title: "seed".to_string(),
            value: "hi".to_string(),
        };
        assert_eq!(store.update_snippet(&snippet.id, &identical).await.unwrap(), 0);

        let changed = SnippetPatch {
            title: "seed".to_string(),
            value: "ho".to_string(),
        };
        assert_eq!(store.update_snippet(&snippet.id, &changed).await.unwrap(), 1);
        assert_eq!(store.update_snippet("no-such-id", &changed).await.unwrap(), 0);

        let stored = store.find_snippet(&snippet.id).await.unwrap().unwrap();
        assert_eq!(stored.value, "ho");
        assert_eq!(stored.owner.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_sqlite_delete_counts() {
        let store = sqlite_store().await;
        let snippet = seed_snippet(&store, "alice", "hi").await;

        assert_eq!(store.delete_snippet(&snippet.id).await.unwrap(), 1);
        assert_eq!(store.delete_snippet(&snippet.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sqlite_unique_username_violation() {
        let store = sqlite_store().await;

        let credential = Credential {
            username: "alice".to_string(),
            password_hash: "$argon2id$fake-hash".to_string(),
            created_at: Utc::now(),
        };

        store.insert_credential(credential.clone()).await.unwrap();
        let err = store.insert_credential(credential).await.unwrap_err();
        assert!(err.is_duplicate_username());
    }
}
