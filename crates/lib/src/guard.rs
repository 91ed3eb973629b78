//! Pre-handler authentication and ownership checks.
//!
//! Guards run before a handler touches the record store and short-circuit
//! request processing on failure, so an unauthorized request causes no store
//! side effects. The ownership guard composes after the auth guard:
//! ownership is meaningless without an authenticated identity to compare
//! against.

use thiserror::Error;

use crate::Error;
use crate::session::{Flash, RequestContext};
use crate::snippet::Snippet;
use crate::store::RecordStore;

/// Errors produced by the guard chain.
///
/// These are terminal for the current request: callers convert them into a
/// flash message plus a redirect, never into a raw error page.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The session is not logged in.
    #[error("You must be logged in to do that")]
    NotAuthenticated,

    /// The target snippet does not exist.
    #[error("Snippet not found")]
    NotFound,

    /// The session identity does not own the target snippet.
    #[error("You do not own this snippet")]
    Forbidden,
}

impl GuardError {
    /// Check if this error indicates a missing login.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, GuardError::NotAuthenticated)
    }

    /// Check if this error indicates the target was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GuardError::NotFound)
    }

    /// Check if this error indicates an ownership rejection.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, GuardError::Forbidden)
    }
}

// Conversion from GuardError to the main Error type
impl From<GuardError> for Error {
    fn from(err: GuardError) -> Self {
        Error::Guard(err)
    }
}

/// Auth guard: proceed iff the session is authenticated.
///
/// Returns the session identity on success. On failure, sets a danger
/// "login required" flash and fails with `NotAuthenticated`; the caller
/// redirects instead of rendering, before any store access happens.
pub async fn authorize(ctx: &RequestContext) -> Result<String, GuardError> {
    match ctx.identity() {
        Some(identity) if ctx.is_logged_in() => Ok(identity.to_string()),
        _ => {
            ctx.set_flash(Flash::danger(GuardError::NotAuthenticated.to_string()))
                .await;
            Err(GuardError::NotAuthenticated)
        }
    }
}

/// Ownership comparison.
///
/// An undefined identity never matches, even against a snippet that has no
/// recorded owner - a misconfigured guard chain must fail closed.
pub fn is_owner(identity: Option<&str>, snippet: &Snippet) -> bool {
    match (identity, snippet.owner.as_deref()) {
        (Some(who), Some(owner)) => who == owner,
        _ => false,
    }
}

/// Ownership guard: fetch the target snippet and compare its owner against
/// the session identity. Composes after [`authorize`].
///
/// An absent snippet fails with `NotFound` and no flash - the caller decides
/// how to report it, since delete treats it as idempotent success. An owner
/// mismatch (or an undefined identity) fails with `Forbidden` and sets a
/// danger flash. On success the fetched snippet is returned so the handler
/// needs no second read.
pub async fn authorize_owner(
    ctx: &RequestContext,
    store: &dyn RecordStore,
    id: &str,
) -> crate::Result<Snippet> {
    let Some(snippet) = store.find_snippet(id).await? else {
        return Err(GuardError::NotFound.into());
    };

    if !is_owner(ctx.identity(), &snippet) {
        tracing::debug!(
            snippet = %snippet.id,
            identity = ctx.identity().unwrap_or("<anonymous>"),
            "Ownership check rejected"
        );
        ctx.set_flash(Flash::danger(GuardError::Forbidden.to_string()))
            .await;
        return Err(GuardError::Forbidden.into());
    }

    Ok(snippet)
}
