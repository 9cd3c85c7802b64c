//! User account commands.
//!
//! # Usage
//!
//! ```bash
//! STOCKROOM_NEW_USER_PASSWORD=abcdef stockroom-cli user create -u alice
//! ```

use secrecy::{ExposeSecret, SecretString};
use stockroom_core::UserId;
use stockroom_web::services::auth::AuthService;

use super::{CommandError, connect};

/// Register a user through the same path as the web form.
///
/// # Errors
///
/// Returns `CommandError::Auth` if the username is taken or the password is
/// too short.
pub async fn create(username: &str, password: &SecretString) -> Result<UserId, CommandError> {
    let pool = connect().await?;
    stockroom_web::db::migrate(&pool).await?;

    let user = AuthService::new(&pool)
        .register(username, password.expose_secret())
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(user.id)
}
