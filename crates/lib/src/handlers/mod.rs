//! Request handlers for the web surface.
//!
//! Handlers orchestrate the record store, session store and guards, and hand
//! back a [`Reply`]: a named view with its plain data payload, or a redirect.
//! The binary maps replies onto HTTP responses and owns all rendering; no
//! HTTP types appear in this module.
//!
//! Control flow per request: auth guard (if the route requires login), then
//! ownership guard (if the route mutates a specific record), then the
//! handler body, which talks to the store and writes a flash outcome into
//! the session before producing its reply. The first failed guard
//! short-circuits the chain with a redirect.

pub mod accounts;
pub mod snippets;

pub use accounts::{LoginForm, RegisterForm};

use crate::snippet::Snippet;

/// Route paths shared between redirect targets and the router.
pub mod routes {
    pub const LIST: &str = "/";
    pub const NEW: &str = "/snippets/new";
    pub const CREATE: &str = "/snippets/create";
    pub const LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";
    pub const REGISTER: &str = "/register";

    /// Path of a snippet's show page.
    pub fn show(id: &str) -> String {
        format!("/snippets/{id}")
    }

    /// Path of a snippet's edit form.
    pub fn edit(id: &str) -> String {
        format!("/snippets/{id}/edit")
    }

    /// Path of a snippet's remove confirmation form.
    pub fn remove(id: &str) -> String {
        format!("/snippets/{id}/remove")
    }
}

/// What a handler hands back to the HTTP layer.
#[derive(Clone, Debug)]
pub enum Reply {
    /// Render a named view with its payload.
    View(View),
    /// Send the visitor to another route; any pending flash is shown there.
    Redirect(String),
}

impl Reply {
    fn redirect(location: impl Into<String>) -> Self {
        Reply::Redirect(location.into())
    }
}

/// Named views with their plain data payloads.
///
/// Rendering is out of scope for the library; the binary owns the templates.
#[derive(Clone, Debug)]
pub enum View {
    /// All snippets, projected for display.
    SnippetList { snippets: Vec<SnippetCard> },
    /// A single snippet.
    SnippetShow { snippet: Snippet },
    /// The create form.
    SnippetNew,
    /// The edit form for an owned snippet.
    SnippetEdit { snippet: Snippet },
    /// The remove confirmation form for an owned snippet.
    SnippetRemove { snippet: Snippet },
    /// The login form.
    Login,
    /// The registration form.
    Register,
}

/// Display projection of a snippet for the list view.
#[derive(Clone, Debug)]
pub struct SnippetCard {
    pub id: String,
    pub value: String,
    pub title: Option<String>,
    pub owner: Option<String>,
}

impl From<&Snippet> for SnippetCard {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id.clone(),
            value: snippet.value.clone(),
            title: snippet.title.clone(),
            owner: snippet.owner.clone(),
        }
    }
}
