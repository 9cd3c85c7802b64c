//! Authentication error types.

use thiserror::Error;

use stockroom_core::{PasswordError, UsernameError};

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username at registration.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Password does not meet the registration policy.
    #[error("password validation failed: {0}")]
    WeakPassword(#[from] PasswordError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Message safe to show on the registration or login form, if this error
    /// is one the user can fix.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::InvalidUsername(UsernameError::Empty) => Some("Username is required.".into()),
            Self::InvalidUsername(UsernameError::TooLong { max }) => {
                Some(format!("Username must be at most {max} characters."))
            }
            Self::WeakPassword(PasswordError::Missing) => Some("Password is required.".into()),
            Self::WeakPassword(PasswordError::TooShort { min }) => {
                Some(format!("Password must be at least {min} characters."))
            }
            Self::InvalidCredentials | Self::UserNotFound => {
                Some("Invalid username or password.".into())
            }
            Self::UserAlreadyExists => Some("Username already exists.".into()),
            Self::Repository(_) | Self::PasswordHash => None,
        }
    }
}
