//! Seed the database with default users, items and carts.
//!
//! Existing records are left untouched, so seeding can be repeated safely.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use corner_store_api::db::Repositories;
use corner_store_api::defaults::{Defaults, DefaultsError};

use super::{ConnectError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Defaults(#[from] DefaultsError),
}

/// Seed default data from `file`.
///
/// # Errors
///
/// Returns `SeedError` if the file is invalid or database operations fail.
pub async fn defaults(file: &Path) -> Result<(), SeedError> {
    info!(path = %file.display(), "Loading default data");
    let defaults = Defaults::load(file)?;
    info!(
        users = defaults.users.len(),
        items = defaults.items.len(),
        carts = defaults.carts.len(),
        "Parsed default data"
    );

    let pool = connect().await?;
    let report = defaults.seed(&Repositories::postgres(pool)).await?;

    info!(
        users = report.users,
        items = report.items,
        carts = report.carts,
        "Seeding complete"
    );
    Ok(())
}
