//! Database migration command.
//!
//! Migrations are embedded from `crates/api/migrations/`:
//! ```text
//! migrations/
//! └── 20260101000001_create_store.sql
//! ```

use thiserror::Error;

use super::{ConnectError, connect};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending store migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running store migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Store migrations complete!");
    Ok(())
}
