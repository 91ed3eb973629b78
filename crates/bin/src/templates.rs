//! HTML templates for the web interface
//!
//! Simple inline HTML templates without a template engine.

use snipboard::handlers::{SnippetCard, routes};
use snipboard::session::{Flash, FlashKind};
use snipboard::snippet::Snippet;

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 800px;
        margin: 40px auto;
        padding: 0 20px;
        background: #f5f5f5;
    }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
        color: #333;
        border-bottom: 2px solid #0066cc;
        padding-bottom: 10px;
    }
    h2 {
        color: #555;
        margin-top: 30px;
    }
    nav {
        margin-bottom: 20px;
    }
    nav a {
        color: #0066cc;
        text-decoration: none;
        margin-right: 15px;
    }
    nav form {
        display: inline;
    }
    .info-row {
        margin: 10px 0;
        padding: 8px;
        background: #f9f9f9;
        border-radius: 4px;
    }
    .label {
        font-weight: bold;
        color: #666;
        display: inline-block;
        width: 120px;
    }
    .value {
        color: #0066cc;
    }
    form {
        margin: 20px 0;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
        color: #333;
    }
    input[type="text"],
    input[type="password"] {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    button {
        background: #0066cc;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
    }
    button:hover {
        background: #0052a3;
    }
    .danger-btn {
        background: #d9534f;
    }
    .danger-btn:hover {
        background: #b52b27;
    }
    .logout-btn {
        background: #999;
    }
    .logout-btn:hover {
        background: #777;
    }
    table {
        width: 100%;
        border-collapse: collapse;
        margin: 20px 0;
    }
    th, td {
        text-align: left;
        padding: 12px;
        border-bottom: 1px solid #ddd;
    }
    th {
        background: #f0f0f0;
        font-weight: bold;
        color: #333;
    }
    tr:hover {
        background: #f9f9f9;
    }
    .flash-success {
        color: #3c763d;
        background: #dff0d8;
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
    .flash-danger {
        color: #d9534f;
        background: #f2dede;
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
    .code {
        font-family: monospace;
        background: #f5f5f5;
        padding: 2px 6px;
        border-radius: 3px;
        font-size: 13px;
    }
"#;

/// Wrap a page body in the shared document skeleton.
fn page(title: &str, nav: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Snipboard - {title}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        {nav}
        {body}
    </div>
</body>
</html>"#
    )
}

/// Render the pending flash as a banner, if any.
fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => {
            let class = match flash.kind {
                FlashKind::Success => "flash-success",
                FlashKind::Danger => "flash-danger",
            };
            format!(r#"<div class="{}">{}</div>"#, class, html_escape(&flash.text))
        }
        None => String::new(),
    }
}

/// Navigation bar, varying with login state.
fn nav_bar(identity: Option<&str>) -> String {
    match identity {
        Some(identity) => format!(
            r#"<nav>
            <a href="{list}">Snippets</a>
            <a href="{new}">New snippet</a>
            <form method="POST" action="{logout}">
                <button type="submit" class="logout-btn">Logout ({who})</button>
            </form>
        </nav>"#,
            list = routes::LIST,
            new = routes::NEW,
            logout = routes::LOGOUT,
            who = html_escape(identity),
        ),
        None => format!(
            r#"<nav>
            <a href="{list}">Snippets</a>
            <a href="{login}">Login</a>
            <a href="{register}">Register</a>
        </nav>"#,
            list = routes::LIST,
            login = routes::LOGIN,
            register = routes::REGISTER,
        ),
    }
}

/// Render the snippet list page
pub fn list_page(snippets: &[SnippetCard], identity: Option<&str>, flash: Option<&Flash>) -> String {
    let rows_html = if snippets.is_empty() {
        r#"<p style="color: #666; font-style: italic;">No snippets yet.</p>"#.to_string()
    } else {
        let rows: String = snippets
            .iter()
            .map(|snippet| {
                let title = snippet.title.as_deref().unwrap_or("(untitled)");
                let owner = snippet.owner.as_deref().unwrap_or("-");
                let actions = if identity.is_some() && identity == snippet.owner.as_deref() {
                    format!(
                        r#"<a href="{edit}">Edit</a> <a href="{remove}">Remove</a>"#,
                        edit = routes::edit(&snippet.id),
                        remove = routes::remove(&snippet.id),
                    )
                } else {
                    String::new()
                };
                format!(
                    r#"<tr>
                    <td><a href="{show}">{title}</a></td>
                    <td>{value}</td>
                    <td>{owner}</td>
                    <td>{actions}</td>
                </tr>"#,
                    show = routes::show(&snippet.id),
                    title = html_escape(title),
                    value = html_escape(&snippet.value),
                    owner = html_escape(owner),
                )
            })
            .collect();

        format!(
            r#"<table>
            <tr>
                <th>Title</th>
                <th>Snippet</th>
                <th>Owner</th>
                <th>Actions</th>
            </tr>
            {rows}
        </table>"#
        )
    };

    let body = format!(
        "<h1>Snippets</h1>\n{flash}\n{rows_html}",
        flash = flash_banner(flash),
    );
    page("Snippets", &nav_bar(identity), &body)
}

/// Render a single snippet page
pub fn show_page(snippet: &Snippet, identity: Option<&str>, flash: Option<&Flash>) -> String {
    let title = snippet.title.as_deref().unwrap_or("(untitled)");
    let owner = snippet.owner.as_deref().unwrap_or("-");

    let body = format!(
        r#"<h1>{title}</h1>
        {flash}
        <div class="info-row">
            <span class="label">Snippet:</span>
            <span class="value">{value}</span>
        </div>
        <div class="info-row">
            <span class="label">Owner:</span>
            <span class="value">{owner}</span>
        </div>
        <div class="info-row">
            <span class="label">Created:</span>
            <span class="value code">{created}</span>
        </div>
        <div class="info-row">
            <span class="label">Updated:</span>
            <span class="value code">{updated}</span>
        </div>"#,
        title = html_escape(title),
        flash = flash_banner(flash),
        value = html_escape(&snippet.value),
        owner = html_escape(owner),
        created = snippet.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        updated = snippet.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    page("Snippet", &nav_bar(identity), &body)
}

/// Render the create form
pub fn new_page(identity: Option<&str>, flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<h1>New Snippet</h1>
        {flash}
        <form method="POST" action="{create}">
            <div class="form-group">
                <label for="title">Title:</label>
                <input type="text" id="title" name="title" required autofocus>
            </div>
            <div class="form-group">
                <label for="value">Snippet (1-42 characters):</label>
                <input type="text" id="value" name="value" maxlength="42" required>
            </div>
            <button type="submit">Create</button>
        </form>"#,
        flash = flash_banner(flash),
        create = routes::CREATE,
    );
    page("New Snippet", &nav_bar(identity), &body)
}

/// Render the edit form
pub fn edit_page(snippet: &Snippet, identity: Option<&str>, flash: Option<&Flash>) -> String {
    let title = snippet.title.as_deref().unwrap_or("");

    let body = format!(
        r#"<h1>Edit Snippet</h1>
        {flash}
        <form method="POST" action="/snippets/{id}/update">
            <div class="form-group">
                <label for="title">Title:</label>
                <input type="text" id="title" name="title" value="{title}" required autofocus>
            </div>
            <div class="form-group">
                <label for="value">Snippet (1-42 characters):</label>
                <input type="text" id="value" name="value" value="{value}" maxlength="42" required>
            </div>
            <button type="submit">Save</button>
        </form>"#,
        flash = flash_banner(flash),
        id = html_escape(&snippet.id),
        title = html_escape(title),
        value = html_escape(&snippet.value),
    );
    page("Edit Snippet", &nav_bar(identity), &body)
}

/// Render the remove confirmation form
pub fn remove_page(snippet: &Snippet, identity: Option<&str>, flash: Option<&Flash>) -> String {
    let title = snippet.title.as_deref().unwrap_or("(untitled)");

    let body = format!(
        r#"<h1>Remove Snippet</h1>
        {flash}
        <p>Delete <strong>{title}</strong> ("{value}")? This cannot be undone.</p>
        <form method="POST" action="/snippets/{id}/delete">
            <button type="submit" class="danger-btn">Delete</button>
        </form>"#,
        flash = flash_banner(flash),
        title = html_escape(title),
        value = html_escape(&snippet.value),
        id = html_escape(&snippet.id),
    );
    page("Remove Snippet", &nav_bar(identity), &body)
}

/// Render the login page
pub fn login_page(flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<h1>Login</h1>
        {flash}
        <form method="POST" action="{login}">
            <div class="form-group">
                <label for="username">Username:</label>
                <input type="text" id="username" name="username" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password:</label>
                <input type="password" id="password" name="password" required>
            </div>
            <button type="submit">Login</button>
        </form>
        <p style="margin-top: 20px; text-align: center;">
            Don't have an account? <a href="{register}">Register here</a>
        </p>"#,
        flash = flash_banner(flash),
        login = routes::LOGIN,
        register = routes::REGISTER,
    );
    page("Login", &nav_bar(None), &body)
}

/// Render the registration page
pub fn register_page(flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<h1>Register New Account</h1>
        {flash}
        <form method="POST" action="{register}">
            <div class="form-group">
                <label for="username">Username:</label>
                <input type="text" id="username" name="username" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password (at least 10 characters):</label>
                <input type="password" id="password" name="password" required>
            </div>
            <button type="submit">Create Account</button>
        </form>
        <p style="margin-top: 20px; text-align: center;">
            Already have an account? <a href="{login}">Login here</a>
        </p>"#,
        flash = flash_banner(flash),
        register = routes::REGISTER,
        login = routes::LOGIN,
    );
    page("Register", &nav_bar(None), &body)
}

/// Render the uniform error page
pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        r#"<h1>{status}</h1>
        <p>{message}</p>
        <p><a href="{list}">Back to snippets</a></p>"#,
        message = html_escape(message),
        list = routes::LIST,
    );
    page("Error", &nav_bar(None), &body)
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
