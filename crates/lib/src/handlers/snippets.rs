//! Snippet CRUD handlers: list, show, create, edit, update, remove, delete.
//!
//! Guard failures and validation/store errors become a flash plus a
//! redirect; only the not-found path of `show` and read failures of `list`
//! propagate as errors, which the binary maps onto its error pages. Each
//! handler performs at most one logical write.

use super::{Reply, SnippetCard, View, routes};
use crate::guard;
use crate::session::{Flash, RequestContext};
use crate::snippet::{SnippetDraft, SnippetForm};
use crate::store::{RecordStore, StoreError};
use crate::{Error, Result};

/// GET / - list all snippets.
///
/// No guard. A store failure surfaces to the caller as a rendering error,
/// not as a process failure.
pub async fn list(store: &dyn RecordStore) -> Result<Reply> {
    let snippets = store.find_snippets().await?;
    let snippets = snippets.iter().map(SnippetCard::from).collect();
    Ok(Reply::View(View::SnippetList { snippets }))
}

/// GET /snippets/{id} - show a single snippet.
///
/// No guard. An unknown id propagates as not-found for the error page.
pub async fn show(store: &dyn RecordStore, id: &str) -> Result<Reply> {
    match store.find_snippet(id).await? {
        Some(snippet) => Ok(Reply::View(View::SnippetShow { snippet })),
        None => Err(StoreError::SnippetNotFound { id: id.to_string() }.into()),
    }
}

/// GET /snippets/new - the create form. Requires login.
pub async fn new_form(ctx: &RequestContext) -> Result<Reply> {
    if guard::authorize(ctx).await.is_err() {
        return Ok(Reply::redirect(routes::LOGIN));
    }
    Ok(Reply::View(View::SnippetNew))
}

/// POST /snippets/create. Requires login.
///
/// On success the snippet is stamped with the caller's identity as owner.
/// Validation or store failure sets a danger flash and sends the visitor
/// back to the create form; no partial record persists.
pub async fn create(
    store: &dyn RecordStore,
    ctx: &RequestContext,
    form: &SnippetForm,
) -> Result<Reply> {
    let Ok(identity) = guard::authorize(ctx).await else {
        return Ok(Reply::redirect(routes::LOGIN));
    };

    let patch = match form.validate() {
        Ok(patch) => patch,
        Err(e) => {
            ctx.set_flash(Flash::danger(e.to_string())).await;
            return Ok(Reply::redirect(routes::NEW));
        }
    };

    let draft = SnippetDraft {
        title: Some(patch.title),
        value: patch.value,
        owner: Some(identity),
    };

    match store.insert_snippet(draft).await {
        Ok(snippet) => {
            tracing::info!(id = %snippet.id, "Snippet created");
            ctx.set_flash(Flash::success("Snippet created")).await;
            Ok(Reply::redirect(routes::LIST))
        }
        Err(e) => {
            tracing::warn!("Failed to create snippet: {e}");
            ctx.set_flash(Flash::danger(format!("Could not save the snippet: {e}")))
                .await;
            Ok(Reply::redirect(routes::NEW))
        }
    }
}

/// GET /snippets/{id}/edit - the edit form. Requires login + ownership.
pub async fn edit_form(store: &dyn RecordStore, ctx: &RequestContext, id: &str) -> Result<Reply> {
    if guard::authorize(ctx).await.is_err() {
        return Ok(Reply::redirect(routes::LOGIN));
    }
    match guard::authorize_owner(ctx, store, id).await {
        Ok(snippet) => Ok(Reply::View(View::SnippetEdit { snippet })),
        Err(e) => guard_redirect(ctx, e).await,
    }
}

/// POST /snippets/{id}/update. Requires login + ownership.
///
/// The write is conditional on id and changed content: zero rows modified
/// means the record was concurrently deleted or already matched the
/// submission, and is reported as a conflict flash rather than a hard error.
pub async fn update(
    store: &dyn RecordStore,
    ctx: &RequestContext,
    id: &str,
    form: &SnippetForm,
) -> Result<Reply> {
    if guard::authorize(ctx).await.is_err() {
        return Ok(Reply::redirect(routes::LOGIN));
    }
    if let Err(e) = guard::authorize_owner(ctx, store, id).await {
        return guard_redirect(ctx, e).await;
    }

    let patch = match form.validate() {
        Ok(patch) => patch,
        Err(e) => {
            ctx.set_flash(Flash::danger(e.to_string())).await;
            return Ok(Reply::redirect(routes::edit(id)));
        }
    };

    match store.update_snippet(id, &patch).await {
        Ok(0) => {
            ctx.set_flash(Flash::danger(
                "The snippet was updated by someone else, or nothing changed",
            ))
            .await;
            Ok(Reply::redirect(routes::LIST))
        }
        Ok(_) => {
            tracing::info!(id, "Snippet updated");
            ctx.set_flash(Flash::success("Snippet updated")).await;
            Ok(Reply::redirect(routes::LIST))
        }
        Err(e) => {
            tracing::warn!(id, "Failed to update snippet: {e}");
            ctx.set_flash(Flash::danger(format!("Could not update the snippet: {e}")))
                .await;
            Ok(Reply::redirect(routes::edit(id)))
        }
    }
}

/// GET /snippets/{id}/remove - the delete confirmation form.
/// Requires login + ownership.
pub async fn remove_form(store: &dyn RecordStore, ctx: &RequestContext, id: &str) -> Result<Reply> {
    if guard::authorize(ctx).await.is_err() {
        return Ok(Reply::redirect(routes::LOGIN));
    }
    match guard::authorize_owner(ctx, store, id).await {
        Ok(snippet) => Ok(Reply::View(View::SnippetRemove { snippet })),
        Err(e) => guard_redirect(ctx, e).await,
    }
}

/// POST /snippets/{id}/delete. Requires login; ownership applies when the
/// snippet still exists.
///
/// Deleting an already-absent id is success (idempotent) - including when
/// the conditional delete itself races and removes nothing.
pub async fn delete(store: &dyn RecordStore, ctx: &RequestContext, id: &str) -> Result<Reply> {
    if guard::authorize(ctx).await.is_err() {
        return Ok(Reply::redirect(routes::LOGIN));
    }

    match guard::authorize_owner(ctx, store, id).await {
        Ok(_) => {}
        Err(e) if e.is_not_found() => {
            ctx.set_flash(Flash::success("Snippet deleted")).await;
            return Ok(Reply::redirect(routes::LIST));
        }
        Err(e) => return guard_redirect(ctx, e).await,
    }

    match store.delete_snippet(id).await {
        Ok(deleted) => {
            tracing::info!(id, deleted, "Snippet deleted");
            ctx.set_flash(Flash::success("Snippet deleted")).await;
            Ok(Reply::redirect(routes::LIST))
        }
        Err(e) => {
            tracing::warn!(id, "Failed to delete snippet: {e}");
            ctx.set_flash(Flash::danger(format!("Could not delete the snippet: {e}")))
                .await;
            Ok(Reply::redirect(routes::LIST))
        }
    }
}

/// Convert a failed ownership check into its redirect.
///
/// `NotFound` gets its danger flash here (the guard leaves that to the
/// caller); `Forbidden` already carries one. Store failures propagate.
async fn guard_redirect(ctx: &RequestContext, err: Error) -> Result<Reply> {
    if err.is_not_found() {
        ctx.set_flash(Flash::danger("No such snippet")).await;
        Ok(Reply::redirect(routes::LIST))
    } else if err.is_forbidden() {
        Ok(Reply::redirect(routes::LIST))
    } else {
        Err(err)
    }
}
