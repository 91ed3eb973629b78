//! Per-visitor session state and flash messages.
//!
//! Sessions are keyed by an opaque token (UUID) held in a cookie. Every
//! visitor gets a session, anonymous or not. Login **regenerates** the token
//! before attaching the identity so no state survives under the old id
//! (session fixation defense); logout destroys the session outright and the
//! visitor continues on a fresh anonymous one. Sessions are ephemeral and
//! lost on server restart.

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (UUID stored in cookie)
pub type SessionToken = String;

/// Severity of a flash message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashKind {
    Success,
    Danger,
}

/// A one-time status message attached to a session, shown on the next
/// rendered page and then discarded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    /// A success flash.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    /// A danger flash.
    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            text: text.into(),
        }
    }
}

/// Per-visitor session state.
///
/// `logged_in` and `identity` are set together on login and cleared together
/// when the session is destroyed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub identity: Option<String>,
    pub flash: Option<Flash>,
}

impl Session {
    /// Whether this session is indistinguishable from a brand-new anonymous
    /// session.
    pub fn is_anonymous(&self) -> bool {
        !self.logged_in && self.identity.is_none() && self.flash.is_none()
    }
}

/// In-memory session store.
///
/// Maps session tokens (UUIDs) to [`Session`] state.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl SessionStore {
    /// Create a new empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new anonymous session.
    ///
    /// # Returns
    /// The session token (UUID) to be stored in a cookie
    pub async fn create(&self) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), Session::default());
        token
    }

    /// Snapshot of a session, if it exists.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Attach an identity after successful authentication.
    ///
    /// Regenerates the token first: the old entry is removed and a fresh one
    /// is created under a new token, so nothing survives under the old id.
    ///
    /// # Returns
    /// The new session token
    pub async fn login(&self, token: &str, identity: &str) -> SessionToken {
        let new_token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        sessions.insert(
            new_token.clone(),
            Session {
                logged_in: true,
                identity: Some(identity.to_string()),
                flash: None,
            },
        );
        new_token
    }

    /// Destroy a session entirely, including its backing entry.
    pub async fn destroy(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }

    /// Set the pending flash on an existing session.
    ///
    /// Within one visitor's concurrent requests, last write wins.
    pub async fn set_flash(&self, token: &str, flash: Flash) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(token) {
            session.flash = Some(flash);
        }
    }

    /// Take the pending flash, clearing it atomically.
    ///
    /// The next render never sees a stale message.
    pub async fn take_flash(&self, token: &str) -> Option<Flash> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(token).and_then(|s| s.flash.take())
    }

    /// Get the number of active sessions (for diagnostics)
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

/// Explicit per-request context: the session snapshot plus a handle to
/// mutate it.
///
/// Handlers and guards receive this value instead of reaching into any
/// request-global state. The snapshot is taken when the context is attached;
/// flash mutations go straight to the store.
pub struct RequestContext {
    sessions: SessionStore,
    token: SessionToken,
    session: Session,
}

impl RequestContext {
    /// Attach to an existing session, or create a fresh anonymous one when
    /// the token is missing or stale.
    pub async fn attach(sessions: &SessionStore, token: Option<&str>) -> Self {
        let (token, session) = match token {
            Some(t) => match sessions.get(t).await {
                Some(session) => (t.to_string(), session),
                None => (sessions.create().await, Session::default()),
            },
            None => (sessions.create().await, Session::default()),
        };

        Self {
            sessions: sessions.clone(),
            token,
            session,
        }
    }

    /// The current session token. Changes on login and logout.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The session snapshot taken at attach time.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the session is authenticated.
    pub fn is_logged_in(&self) -> bool {
        self.session.logged_in
    }

    /// The authenticated identity, if any.
    pub fn identity(&self) -> Option<&str> {
        self.session.identity.as_deref()
    }

    /// Set the pending flash for the next rendered page.
    pub async fn set_flash(&self, flash: Flash) {
        self.sessions.set_flash(&self.token, flash).await;
    }

    /// Take the pending flash, clearing it atomically.
    pub async fn take_flash(&self) -> Option<Flash> {
        self.sessions.take_flash(&self.token).await
    }

    /// Log in: regenerate the session and attach the identity.
    pub async fn login(&mut self, identity: &str) {
        self.token = self.sessions.login(&self.token, identity).await;
        self.session = self.sessions.get(&self.token).await.unwrap_or_default();
    }

    /// Log out: destroy the session and continue on a fresh anonymous one.
    pub async fn logout(&mut self) {
        self.sessions.destroy(&self.token).await;
        self.token = self.sessions.create().await;
        self.session = Session::default();
    }
}
