//! Tests for the auth and ownership guards.

use snipboard::guard;
use snipboard::session::{FlashKind, SessionStore};

use crate::helpers::*;

#[tokio::test]
async fn test_authorize_proceeds_when_logged_in() {
    let sessions = SessionStore::new();
    let ctx = logged_in_ctx(&sessions, "alice").await;

    let identity = guard::authorize(&ctx).await.unwrap();
    assert_eq!(identity, "alice");

    // No flash on the success path
    assert_eq!(ctx.take_flash().await, None);
}

#[tokio::test]
async fn test_authorize_rejects_anonymous_with_danger_flash() {
    let sessions = SessionStore::new();
    let ctx = anonymous_ctx(&sessions).await;

    let err = guard::authorize(&ctx).await.unwrap_err();
    assert!(err.is_not_authenticated());

    let flash = ctx.take_flash().await.unwrap();
    assert_eq!(flash.kind, FlashKind::Danger);
}

#[tokio::test]
async fn test_authorize_owner_proceeds_for_owner() {
    let store = memory_store();
    let sessions = SessionStore::new();
    let ctx = logged_in_ctx(&sessions, "alice").await;
    let snippet = seed_snippet(store.as_ref(), "alice", "hi").await;

    let fetched = guard::authorize_owner(&ctx, store.as_ref(), &snippet.id)
        .await
        .unwrap();

    assert_eq!(fetched.id, snippet.id);
    assert_eq!(ctx.take_flash().await, None);
}

#[tokio::test]
async fn test_authorize_owner_rejects_other_user() {
    let store = memory_store();
    let sessions = SessionStore::new();
    let ctx = logged_in_ctx(&sessions, "bob").await;
    let snippet = seed_snippet(store.as_ref(), "alice", "hi").await;

    let err = guard::authorize_owner(&ctx, store.as_ref(), &snippet.id)
        .await
        .unwrap_err();

    assert!(err.is_forbidden());
    let flash = ctx.take_flash().await.unwrap();
    assert_eq!(flash.kind, FlashKind::Danger);
}

#[tokio::test]
async fn test_authorize_owner_rejects_undefined_identity() {
    let store = memory_store();
    let sessions = SessionStore::new();
    let ctx = anonymous_ctx(&sessions).await;
    let snippet = seed_snippet(store.as_ref(), "alice", "hi").await;

    // A misconfigured guard chain must fail closed, never match
    let err = guard::authorize_owner(&ctx, store.as_ref(), &snippet.id)
        .await
        .unwrap_err();

    assert!(err.is_forbidden());
}

#[tokio::test]
async fn test_authorize_owner_missing_snippet_is_not_found_without_flash() {
    let store = memory_store();
    let sessions = SessionStore::new();
    let ctx = logged_in_ctx(&sessions, "alice").await;

    let err = guard::authorize_owner(&ctx, store.as_ref(), "no-such-id")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    // The caller decides how to report not-found; the guard sets no flash
    assert_eq!(ctx.take_flash().await, None);
}
