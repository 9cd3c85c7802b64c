//! Authentication route handlers.
//!
//! Registration and login re-render their form on failure; success always
//! redirects so a browser refresh never resubmits the form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use stockroom_core::FlashLevel;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    OptionalAuth, PageContext, clear_current_user, push_flash, set_current_user,
};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Where authenticated visitors land.
const AFTER_LOGIN: &str = "/products";

// =============================================================================
// Form Types
// =============================================================================

/// Credentials form shared by login and registration.
///
/// Missing fields deserialize as empty strings and are reported like blank
/// input.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
    pub username: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub username: String,
}

fn failure_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::UserAlreadyExists => StatusCode::CONFLICT,
        AuthError::InvalidCredentials | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(OptionalAuth(user): OptionalAuth, ctx: PageContext) -> Response {
    if user.is_some() {
        return Redirect::to(AFTER_LOGIN).into_response();
    }

    RegisterTemplate {
        ctx,
        username: String::new(),
    }
    .into_response()
}

/// Handle registration form submission.
#[tracing::instrument(skip_all, fields(username = %form.username.trim()))]
pub async fn register(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    ctx: PageContext,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to(AFTER_LOGIN).into_response());
    }

    match AuthService::new(state.pool())
        .register(&form.username, &form.password)
        .await
    {
        Ok(_) => {
            push_flash(
                &session,
                FlashLevel::Success,
                "Registration successful. Please log in.",
            )
            .await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            let Some(message) = e.user_message() else {
                return Err(AppError::Auth(e));
            };
            tracing::info!(error = %e, "Registration rejected");

            let page = RegisterTemplate {
                ctx: ctx.with_flash(FlashLevel::Danger, message),
                username: form.username,
            };
            Ok((failure_status(&e), page).into_response())
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(OptionalAuth(user): OptionalAuth, ctx: PageContext) -> Response {
    if user.is_some() {
        return Redirect::to(AFTER_LOGIN).into_response();
    }

    LoginTemplate {
        ctx,
        username: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
#[tracing::instrument(skip_all, fields(username = %form.username.trim()))]
pub async fn login(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    ctx: PageContext,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to(AFTER_LOGIN).into_response());
    }

    match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            set_current_user(&session, &user).await?;
            set_sentry_user(&user.id, user.username.as_str());
            tracing::info!(user_id = %user.id, "User logged in");
            Ok(Redirect::to(AFTER_LOGIN).into_response())
        }
        Err(e) => {
            let Some(message) = e.user_message() else {
                return Err(AppError::Auth(e));
            };
            tracing::info!(error = %e, "Login rejected");

            let page = LoginTemplate {
                ctx: ctx.with_flash(FlashLevel::Danger, message),
                username: form.username,
            };
            Ok((failure_status(&e), page).into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// End the session and return to the landing page.
///
/// Anonymous visitors are redirected home without touching the session.
pub async fn logout(OptionalAuth(user): OptionalAuth, session: Session) -> Result<Redirect> {
    if let Some(user) = user {
        clear_current_user(&session).await?;
        clear_sentry_user();
        push_flash(&session, FlashLevel::Info, "You have been logged out.").await?;
        tracing::info!(user_id = %user.id, "User logged out");
    }

    Ok(Redirect::to("/"))
}
