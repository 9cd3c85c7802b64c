//! Session middleware configuration.
//!
//! Sets up SQLite-backed sessions using tower-sessions. The cookie carries
//! only the signed session id; the record itself lives in the
//! `tower_sessions` table next to the application data.

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "stockroom_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// How often expired session rows are purged.
const EXPIRED_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// The concrete session layer used by the router.
pub type SessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

/// Errors that can occur while building the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionSetupError {
    /// The signing key could not be derived from the session secret.
    #[error("session secret cannot be used as a signing key: {0}")]
    InvalidKey(#[from] tower_sessions::cookie::KeyError),

    /// Creating the session table failed.
    #[error("session store migration failed: {0}")]
    Migration(#[from] sqlx::Error),
}

/// Create the session store and make sure its table exists.
///
/// # Errors
///
/// Returns `SessionSetupError::Migration` if the table cannot be created.
pub async fn create_session_store(pool: &SqlitePool) -> Result<SqliteStore, SessionSetupError> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;
    Ok(store)
}

/// Create the signed-cookie session layer.
///
/// # Arguments
///
/// * `store` - Migrated SQLite session store
/// * `config` - Application configuration (for the session secret and scheme)
///
/// # Errors
///
/// Returns `SessionSetupError::InvalidKey` if the secret is shorter than 64 bytes.
pub fn create_session_layer(
    store: SqliteStore,
    config: &AppConfig,
) -> Result<SessionLayer, SessionSetupError> {
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}

/// Spawn a background task that deletes expired sessions.
pub fn spawn_expired_session_sweeper(store: SqliteStore) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = store
            .continuously_delete_expired(EXPIRED_SWEEP_INTERVAL)
            .await
        {
            tracing::error!(error = %e, "Expired session sweeper stopped");
        }
    })
}
