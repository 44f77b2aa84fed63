//! Storage for the store's four entity kinds.
//!
//! Each entity kind is reached through its own repository trait. Three
//! backends implement all four traits:
//!
//! - [`MemoryStore`] - process-local maps, used by tests and the default config
//! - [`FileStore`] - one JSON document per collection in a data directory
//! - [`PgStore`] - `PostgreSQL` tables in the `store` schema
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p corner-store-cli -- migrate
//! ```

pub mod file;
pub mod memory;
pub mod postgres;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use corner_store_core::{Email, ItemId};

use crate::models::{Cart, Item, Order, User};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading or writing a store document failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A store document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Users, looked up by email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Insert or replace the user with the same email.
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;
}

/// Catalog items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, RepositoryError>;

    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepositoryError>;

    /// Insert or replace the item with the same ID.
    async fn save(&self, item: &Item) -> Result<(), RepositoryError>;
}

/// Carts, one per email.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get_by_email(&self, email: &Email) -> Result<Option<Cart>, RepositoryError>;

    /// Insert or replace the cart for `cart.email`.
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;
}

/// Placed orders. Orders are append-only.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn place(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Orders for `email`, oldest first.
    async fn list_by_email(&self, email: &Email) -> Result<Vec<Order>, RepositoryError>;
}

/// The set of repositories a request handler works with.
///
/// Cheap to clone; every backend is shared behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    users: Arc<dyn UserRepository>,
    items: Arc<dyn ItemRepository>,
    carts: Arc<dyn CartRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    /// Serve all four repositories from one backend.
    pub fn from_store<S>(store: S) -> Self
    where
        S: UserRepository + ItemRepository + CartRepository + OrderRepository + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            items: store.clone(),
            carts: store.clone(),
            orders: store,
        }
    }

    /// Process-local storage. Everything is lost on restart.
    #[must_use]
    pub fn memory() -> Self {
        Self::from_store(MemoryStore::default())
    }

    /// JSON documents under `dir`.
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self::from_store(FileStore::new(dir))
    }

    /// `PostgreSQL` tables reached through `pool`.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_store(PgStore::new(pool))
    }

    #[must_use]
    pub fn users(&self) -> &dyn UserRepository {
        &*self.users
    }

    #[must_use]
    pub fn items(&self) -> &dyn ItemRepository {
        &*self.items
    }

    #[must_use]
    pub fn carts(&self) -> &dyn CartRepository {
        &*self.carts
    }

    #[must_use]
    pub fn orders(&self) -> &dyn OrderRepository {
        &*self.orders
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
