//! Serve command - runs the Snipboard web server.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tokio::signal::unix::{SignalKind, signal};
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroize;

use snipboard::{
    constants::MEMORY_STORE_FILE,
    credential::CredentialService,
    handlers::{self, LoginForm, RegisterForm, Reply, View},
    session::{Flash, RequestContext, SessionStore},
    snippet::SnippetForm,
    store::{DbKind, Memory, RecordStore, SqlxBackend},
};

use crate::backend::create_backend;
use crate::cli::ServeArgs;
use crate::templates;

const SESSION_COOKIE: &str = "snipboard_session";

/// Shared application state
#[derive(Clone)]
struct AppState {
    store: Arc<dyn RecordStore>,
    credentials: CredentialService,
    sessions: SessionStore,
}

/// Run the Snipboard server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("snipboard=info".parse().unwrap()),
        )
        .init();

    // Create the storage backend
    let store = create_backend(args).await?;

    let credentials =
        CredentialService::with_min_password_len(store.clone(), args.min_password_length);

    // Create session store
    let sessions = SessionStore::new();

    // Create shared application state
    let app_state = AppState {
        store,
        credentials,
        sessions,
    };

    // Build router
    let app = Router::new()
        .route("/", get(handle_list))
        .route("/health", get(handle_health_endpoint))
        .route("/login", get(handle_login_page).post(handle_login_submit))
        .route(
            "/register",
            get(handle_register_page).post(handle_register_submit),
        )
        .route("/logout", post(handle_logout))
        .route("/snippets/new", get(handle_new_form))
        .route("/snippets/create", post(handle_create))
        .route("/snippets/{id}", get(handle_show))
        .route("/snippets/{id}/edit", get(handle_edit_form))
        .route("/snippets/{id}/update", post(handle_update))
        .route("/snippets/{id}/remove", get(handle_remove_form))
        .route("/snippets/{id}/delete", post(handle_delete))
        .fallback(handle_not_found)
        .layer(CookieManagerLayer::new())
        .with_state(app_state.clone());

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    // Print startup message
    println!(
        "Snipboard server starting on http://localhost:{}",
        local_addr.port()
    );
    println!();
    println!("Available endpoints:");
    println!("  GET  /                      - Snippet list");
    println!("  GET  /snippets/new          - Create form (requires login)");
    println!("  POST /snippets/create       - Create a snippet (requires login)");
    println!("  GET  /snippets/:id          - Show a snippet");
    println!("  GET  /snippets/:id/edit     - Edit form (owner only)");
    println!("  POST /snippets/:id/update   - Update a snippet (owner only)");
    println!("  GET  /snippets/:id/remove   - Remove confirmation (owner only)");
    println!("  POST /snippets/:id/delete   - Delete a snippet (owner only)");
    println!("  GET  /login                 - Login page");
    println!("  POST /login                 - Login submission");
    println!("  GET  /register              - Registration page");
    println!("  POST /register              - Registration submission");
    println!("  POST /logout                - Logout");
    println!("  GET  /health                - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to set up SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("failed to set up SIGINT handler");

            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
                _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            }

            // Save store on shutdown (only needed for the in-memory backend)
            if let Some(memory) = app_state.store.as_any().downcast_ref::<Memory>() {
                let json_path = data_dir.join(MEMORY_STORE_FILE);
                match memory.save_to_file(&json_path).await {
                    Ok(_) => {
                        tracing::info!("Store saved to {}", json_path.display());
                        println!("\nStore saved successfully");
                    }
                    Err(e) => {
                        tracing::error!("Failed to save store: {e:?}");
                        eprintln!("Failed to save store: {e:?}");
                    }
                }
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

// ============================================================================
// Request plumbing
// ============================================================================

/// Attach the visitor's session, creating an anonymous one on first contact.
async fn attach_context(state: &AppState, cookies: &Cookies) -> RequestContext {
    let token = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());
    RequestContext::attach(&state.sessions, token.as_deref()).await
}

/// (Re-)issue the session cookie for the context's current token.
///
/// Tokens change on login and logout, so this runs after every handler.
fn issue_cookie(cookies: &Cookies, ctx: &RequestContext) {
    let mut cookie = Cookie::new(SESSION_COOKIE, ctx.token().to_string());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
}

/// Map a handler reply onto an HTTP response.
///
/// Views consume the pending flash; redirects leave it for the next render.
async fn respond(ctx: &RequestContext, reply: snipboard::Result<Reply>) -> Response {
    match reply {
        Ok(Reply::Redirect(location)) => Redirect::to(&location).into_response(),
        Ok(Reply::View(view)) => {
            let flash = ctx.take_flash().await;
            Html(render_view(&view, ctx.identity(), flash.as_ref())).into_response()
        }
        Err(e) if e.is_not_found() => error_response(StatusCode::NOT_FOUND, "Not Found"),
        Err(e) => {
            tracing::error!("Handler failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
        }
    }
}

fn render_view(view: &View, identity: Option<&str>, flash: Option<&Flash>) -> String {
    match view {
        View::SnippetList { snippets } => templates::list_page(snippets, identity, flash),
        View::SnippetShow { snippet } => templates::show_page(snippet, identity, flash),
        View::SnippetNew => templates::new_page(identity, flash),
        View::SnippetEdit { snippet } => templates::edit_page(snippet, identity, flash),
        View::SnippetRemove { snippet } => templates::remove_page(snippet, identity, flash),
        View::Login => templates::login_page(flash),
        View::Register => templates::register_page(flash),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Html(templates::error_page(status.as_u16(), message))).into_response()
}

// ============================================================================
// Snippet Handlers
// ============================================================================

/// Handler for GET / - Snippet list
async fn handle_list(State(state): State<AppState>, cookies: Cookies) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::list(state.store.as_ref()).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for GET /snippets/{id} - Show a snippet
async fn handle_show(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::show(state.store.as_ref(), &id).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for GET /snippets/new - Create form
async fn handle_new_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::new_form(&ctx).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for POST /snippets/create - Create a snippet
async fn handle_create(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SnippetForm>,
) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::create(state.store.as_ref(), &ctx, &form).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for GET /snippets/{id}/edit - Edit form
async fn handle_edit_form(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::edit_form(state.store.as_ref(), &ctx, &id).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for POST /snippets/{id}/update - Update a snippet
async fn handle_update(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<String>,
    Form(form): Form<SnippetForm>,
) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::update(state.store.as_ref(), &ctx, &id, &form).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for GET /snippets/{id}/remove - Remove confirmation form
async fn handle_remove_form(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::remove_form(state.store.as_ref(), &ctx, &id).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for POST /snippets/{id}/delete - Delete a snippet
async fn handle_delete(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::snippets::delete(state.store.as_ref(), &ctx, &id).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

// ============================================================================
// Authentication Handlers
// ============================================================================

/// Handler for GET /login - Show login page
async fn handle_login_page(State(state): State<AppState>, cookies: Cookies) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::accounts::login_form(&ctx).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for POST /login - Process login
async fn handle_login_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(mut form): Form<LoginForm>,
) -> Response {
    let mut ctx = attach_context(&state, &cookies).await;
    let reply = handlers::accounts::login(&state.credentials, &mut ctx, &form).await;
    // Clear the plaintext buffer as soon as the handler is done with it
    form.password.zeroize();
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for POST /logout - Logout and destroy session
async fn handle_logout(State(state): State<AppState>, cookies: Cookies) -> Response {
    let mut ctx = attach_context(&state, &cookies).await;
    let reply = handlers::accounts::logout(&mut ctx).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for GET /register - Show registration page
async fn handle_register_page(State(state): State<AppState>, cookies: Cookies) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::accounts::register_form(&ctx).await;
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

/// Handler for POST /register - Process registration
async fn handle_register_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(mut form): Form<RegisterForm>,
) -> Response {
    let ctx = attach_context(&state, &cookies).await;
    let reply = handlers::accounts::register(&state.credentials, &ctx, &form).await;
    form.password.zeroize();
    issue_cookie(&cookies, &ctx);
    respond(&ctx, reply).await
}

// ============================================================================
// Health and Fallback Handlers
// ============================================================================

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> axum::Json<HealthResponse> {
    let store = state.store.as_ref();
    let backend_type = if let Some(sqlx) = store.as_any().downcast_ref::<SqlxBackend>() {
        match sqlx.kind() {
            DbKind::Sqlite => "sqlite",
            DbKind::Postgres => "postgres",
        }
    } else if store.as_any().is::<Memory>() {
        "inmemory"
    } else {
        "unknown"
    };

    axum::Json(HealthResponse {
        status: "healthy",
        backend: backend_type,
    })
}

/// Fallback for unmatched routes - uniform 404 page
async fn handle_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}
