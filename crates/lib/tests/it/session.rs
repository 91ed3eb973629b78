//! Tests for the session lifecycle and flash messages.

use snipboard::session::{Flash, FlashKind, SessionStore};

use crate::helpers::*;

#[tokio::test]
async fn test_every_visitor_gets_a_session() {
    let sessions = SessionStore::new();

    let ctx = anonymous_ctx(&sessions).await;

    assert!(!ctx.is_logged_in());
    assert_eq!(ctx.identity(), None);
    assert!(sessions.get(ctx.token()).await.is_some());
}

#[tokio::test]
async fn test_login_regenerates_session_id() {
    let sessions = SessionStore::new();
    let mut ctx = anonymous_ctx(&sessions).await;
    let old_token = ctx.token().to_string();

    ctx.login("alice").await;

    // Fixation defense: new token, old entry gone
    assert_ne!(ctx.token(), old_token);
    assert!(sessions.get(&old_token).await.is_none());

    let session = sessions.get(ctx.token()).await.unwrap();
    assert!(session.logged_in);
    assert_eq!(session.identity.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_relogin_overwrites_identity() {
    let sessions = SessionStore::new();
    let mut ctx = anonymous_ctx(&sessions).await;

    ctx.login("alice").await;
    ctx.login("bob").await;

    assert_eq!(ctx.identity(), Some("bob"));
    assert_eq!(sessions.session_count().await, 1);
}

#[tokio::test]
async fn test_login_then_logout_matches_fresh_anonymous_session() {
    let sessions = SessionStore::new();

    let mut ctx = anonymous_ctx(&sessions).await;
    ctx.login("alice").await;
    ctx.logout().await;

    let after_logout = sessions.get(ctx.token()).await.unwrap();

    let fresh = anonymous_ctx(&sessions).await;
    let fresh_session = sessions.get(fresh.token()).await.unwrap();

    // No leftover identity or logged_in state
    assert_eq!(after_logout, fresh_session);
    assert!(after_logout.is_anonymous());
}

#[tokio::test]
async fn test_flash_survives_redirect_and_is_taken_once() {
    let sessions = SessionStore::new();
    let ctx = anonymous_ctx(&sessions).await;

    // A handler sets the flash before redirecting...
    ctx.set_flash(Flash::success("Snippet created")).await;

    // ...the next render takes it exactly once
    let flash = ctx.take_flash().await.unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
    assert_eq!(flash.text, "Snippet created");

    assert_eq!(ctx.take_flash().await, None);
}

#[tokio::test]
async fn test_flash_last_write_wins() {
    let sessions = SessionStore::new();
    let ctx = anonymous_ctx(&sessions).await;

    ctx.set_flash(Flash::success("first")).await;
    ctx.set_flash(Flash::danger("second")).await;

    let flash = ctx.take_flash().await.unwrap();
    assert_eq!(flash.text, "second");
}
