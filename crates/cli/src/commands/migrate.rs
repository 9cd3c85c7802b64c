//! Database migration command.
//!
//! Applies the migrations embedded in `stockroom-web`. The web server runs
//! the same step at startup; this command is for deploys that migrate first.
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DATABASE_URL` - SQLite connection string (falls back to `DATABASE_URL`)

use super::{CommandError, connect};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    stockroom_web::db::migrate(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
