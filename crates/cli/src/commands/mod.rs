//! CLI subcommands.

pub mod migrate;
pub mod user;

use sqlx::SqlitePool;
use thiserror::Error;

use stockroom_web::services::auth::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Account operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Connect using `STOCKROOM_DATABASE_URL` (or `DATABASE_URL`).
pub(crate) async fn connect() -> Result<SqlitePool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = stockroom_web::config::database_url_from_env();
    tracing::info!("Connecting to database...");
    Ok(stockroom_web::db::create_pool(&database_url).await?)
}
