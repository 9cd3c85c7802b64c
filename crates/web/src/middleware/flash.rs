//! One-time flash messages.
//!
//! Messages are queued in the session under a single key and drained by the
//! next page that renders them, so each one is shown exactly once.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use stockroom_core::FlashLevel;

use crate::error::AppError;
use crate::models::{CurrentUser, Flash, session_keys};

/// Queue a flash message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn push_flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut queued: Vec<Flash> = session
        .get(session_keys::FLASHES)
        .await?
        .unwrap_or_default();
    queued.push(Flash::new(level, message));
    session.insert(session_keys::FLASHES, queued).await
}

/// Remove and return every queued flash message.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<Flash>>(session_keys::FLASHES)
        .await?
        .unwrap_or_default())
}

/// Everything the base layout needs: who is logged in and which messages to
/// show. Extracting it consumes the queued flashes.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Username for the navigation bar, if logged in.
    pub username: Option<String>,
    /// Messages to render above the page content.
    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Append a message for this render only (used when a form is re-shown
    /// instead of redirecting).
    #[must_use]
    pub fn with_flash(mut self, level: FlashLevel, message: impl Into<String>) -> Self {
        self.flashes.push(Flash::new(level, message));
        self
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .extensions
            .get::<CurrentUser>()
            .map(|user| user.username.to_string());

        let flashes = match parts.extensions.get::<Session>() {
            Some(session) => take_flashes(session).await?,
            None => Vec::new(),
        };

        Ok(Self { username, flashes })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flashes_drain_in_order() {
        let session = session();
        push_flash(&session, FlashLevel::Success, "first").await.unwrap();
        push_flash(&session, FlashLevel::Info, "second").await.unwrap();

        let flashes = take_flashes(&session).await.unwrap();
        assert_eq!(
            flashes,
            vec![
                Flash::new(FlashLevel::Success, "first"),
                Flash::new(FlashLevel::Info, "second"),
            ]
        );

        assert!(take_flashes(&session).await.unwrap().is_empty());
    }

    #[test]
    fn test_with_flash_appends() {
        let ctx = PageContext::default().with_flash(FlashLevel::Danger, "nope");
        assert_eq!(ctx.flashes, vec![Flash::new(FlashLevel::Danger, "nope")]);
        assert!(ctx.username.is_none());
    }
}
