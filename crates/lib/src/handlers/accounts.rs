//! Login, logout and registration handlers.

use serde::Deserialize;

use super::{Reply, View, routes};
use crate::Result;
use crate::credential::CredentialService;
use crate::session::{Flash, RequestContext};

/// Login form data
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data
#[derive(Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// GET /login - the login form.
///
/// Already-authenticated visitors are sent back to the list.
pub async fn login_form(ctx: &RequestContext) -> Result<Reply> {
    if ctx.is_logged_in() {
        return Ok(Reply::redirect(routes::LIST));
    }
    Ok(Reply::View(View::Login))
}

/// POST /login - authenticate and start an authenticated session.
///
/// Success regenerates the session token before attaching the identity.
/// Failure leaves the session anonymous and reports the undifferentiated
/// invalid-credentials message.
pub async fn login(
    credentials: &CredentialService,
    ctx: &mut RequestContext,
    form: &LoginForm,
) -> Result<Reply> {
    match credentials.authenticate(&form.username, &form.password).await {
        Ok(identity) => {
            ctx.login(&identity).await;
            tracing::info!("User logged in: {}", identity);
            ctx.set_flash(Flash::success(format!("Welcome back, {identity}")))
                .await;
            Ok(Reply::redirect(routes::LIST))
        }
        Err(e) if e.is_invalid_credentials() => {
            ctx.set_flash(Flash::danger(e.to_string())).await;
            Ok(Reply::redirect(routes::LOGIN))
        }
        Err(e) => Err(e),
    }
}

/// POST /logout - destroy the session.
///
/// The visitor continues on a fresh anonymous session carrying the goodbye
/// flash.
pub async fn logout(ctx: &mut RequestContext) -> Result<Reply> {
    ctx.logout().await;
    ctx.set_flash(Flash::success("You are now logged out")).await;
    Ok(Reply::redirect(routes::LIST))
}

/// GET /register - the registration form.
///
/// Already-authenticated visitors are sent back to the list.
pub async fn register_form(ctx: &RequestContext) -> Result<Reply> {
    if ctx.is_logged_in() {
        return Ok(Reply::redirect(routes::LIST));
    }
    Ok(Reply::View(View::Register))
}

/// POST /register - create an account.
///
/// Success redirects to the login form. A duplicate username, weak password
/// or blank username becomes a danger flash back on the registration form.
pub async fn register(
    credentials: &CredentialService,
    ctx: &RequestContext,
    form: &RegisterForm,
) -> Result<Reply> {
    match credentials.register(&form.username, &form.password).await {
        Ok(credential) => {
            ctx.set_flash(Flash::success(format!(
                "Account created for {}, you can now log in",
                credential.username
            )))
            .await;
            Ok(Reply::redirect(routes::LOGIN))
        }
        Err(e) if e.is_duplicate_username() || e.is_validation_error() => {
            ctx.set_flash(Flash::danger(e.to_string())).await;
            Ok(Reply::redirect(routes::REGISTER))
        }
        Err(e) => Err(e),
    }
}
