//! Session-related types.
//!
//! Types stored in the session or derived from it once per request.

use serde::{Deserialize, Serialize};

use stockroom_core::{FlashLevel, UserId, Username};

use super::user::User;

/// The authenticated identity for the current request.
///
/// Only the numeric id is persisted in the session; this value is rebuilt
/// from the `user` table on every request and placed in the request
/// extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's login name.
    pub username: Username,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// A one-time status message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Message category.
    pub level: FlashLevel,
    /// Human-readable text.
    pub message: String,
}

impl Flash {
    /// Create a flash message.
    #[must_use]
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the logged-in user's numeric ID.
    pub const USER_ID: &str = "user_id";

    /// Key for queued flash messages.
    pub const FLASHES: &str = "_flashes";
}
