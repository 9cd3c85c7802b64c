//! Authentication middleware and extractors.
//!
//! The session stores only the user's numeric id. [`load_current_user`]
//! resolves it against the `user` table once per request and places a
//! [`CurrentUser`] in the request extensions; the extractors read from there.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use stockroom_core::{FlashLevel, UserId};

use super::flash::push_flash;
use crate::error::AppError;
use crate::models::{CurrentUser, User, session_keys};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Message shown when an anonymous visitor hits a protected page.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";

/// Resolve the session's user id into a [`CurrentUser`].
///
/// A stale id (the account was deleted) is removed from the session and the
/// request continues anonymously.
///
/// # Errors
///
/// Returns `AppError` if the session or the database cannot be read.
pub async fn load_current_user(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(user_id) = session.get::<UserId>(session_keys::USER_ID).await? {
        match AuthService::new(state.pool()).load_user(user_id).await? {
            Some(user) => {
                request.extensions_mut().insert(CurrentUser::from(user));
            }
            None => {
                tracing::info!(user_id = %user_id, "Dropping session for deleted user");
                session.remove::<UserId>(session_keys::USER_ID).await?;
            }
        }
    }

    Ok(next.run(request).await)
}

/// Extractor that requires a logged-in user.
///
/// Anonymous requests get an info flash and a redirect to `/login`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(Self(user.clone()));
        }

        if let Some(session) = parts.extensions.get::<Session>()
            && let Err(e) = push_flash(session, FlashLevel::Info, LOGIN_REQUIRED_MESSAGE).await
        {
            return Err(AppError::from(e).into_response());
        }

        Err(Redirect::to("/login").into_response())
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<CurrentUser>().cloned()))
    }
}

/// Bind a user to the session after a successful login.
///
/// The session id is rotated first so an id planted before login cannot be
/// reused afterwards.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::USER_ID, user.id).await
}

/// Forget the logged-in user and everything else in the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.clear().await;
    session.cycle_id().await
}
