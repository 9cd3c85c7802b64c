//! Password policy.
//!
//! Plaintext passwords are never wrapped in a long-lived type; they are
//! checked here and handed straight to the hasher.

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Reasons a candidate password is refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// No password was supplied.
    #[error("password is required")]
    Missing,
    /// The password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

/// Check a plaintext password against the registration policy.
///
/// Whitespace is significant and is not trimmed.
///
/// # Errors
///
/// Returns [`PasswordError::Missing`] for an empty password and
/// [`PasswordError::TooShort`] when it has fewer than six characters.
///
/// ```
/// use stockroom_core::{PasswordError, validate_password};
///
/// assert!(validate_password("abcdef").is_ok());
/// assert_eq!(validate_password(""), Err(PasswordError::Missing));
/// ```
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Missing);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}
