//! User domain types.

use stockroom_core::{UserId, Username};

/// An account holder (domain type).
///
/// The password hash never leaves the repository layer except for the
/// single verification performed at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
}
