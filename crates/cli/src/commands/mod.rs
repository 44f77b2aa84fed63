//! CLI subcommands.

pub mod migrate;
pub mod seed;
pub mod user;

use sqlx::PgPool;
use thiserror::Error;

use corner_store_api::config::{ConfigError, get_database_url};
use corner_store_api::db::create_pool;

/// Errors shared by commands that talk to the database.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Neither `STORE_DATABASE_URL` nor `DATABASE_URL` is set.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect to the store database.
///
/// # Errors
///
/// Returns `ConnectError` if no URL is configured or the connection fails.
pub async fn connect() -> Result<PgPool, ConnectError> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url("STORE_DATABASE_URL")?;

    tracing::info!("Connecting to store database...");
    Ok(create_pool(&database_url).await?)
}
