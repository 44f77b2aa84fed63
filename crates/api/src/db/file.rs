//! File-backed backend.
//!
//! Each collection lives in its own JSON document inside the data directory
//! (`users.json`, `items.json`, `carts.json`, `orders.json`). Writes replace the
//! whole document through a temporary file and a rename, so readers never see
//! a half-written file. A single mutex serializes read-modify-write cycles.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use corner_store_core::{Email, ItemId};

use super::{CartRepository, ItemRepository, OrderRepository, RepositoryError, UserRepository};
use crate::models::{Cart, Item, Order, User};

const USERS: &str = "users";
const ITEMS: &str = "items";
const CARTS: &str = "carts";
const ORDERS: &str = "orders";

/// Documents keyed by the string form of their key (email or ID).
type Keyed<T> = BTreeMap<String, T>;

/// JSON documents in a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store documents under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// Read a collection; a missing document is an empty collection.
    async fn load<T>(&self, collection: &str) -> Result<T, RepositoryError>
    where
        T: DeserializeOwned + Default,
    {
        match tokio::fs::read(self.path(collection)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store<T: Serialize + Sync>(
        &self,
        collection: &str,
        value: &T,
    ) -> Result<(), RepositoryError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(collection);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Load, modify and write back a collection while holding the write lock.
    async fn update<T, F>(&self, collection: &str, f: F) -> Result<(), RepositoryError>
    where
        T: Serialize + DeserializeOwned + Default + Send + Sync,
        F: FnOnce(&mut T) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc: T = self.load(collection).await?;
        f(&mut doc);
        self.store(collection, &doc).await?;
        tracing::debug!(collection, dir = %self.dir.display(), "Store document written");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FileStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let mut users: Keyed<User> = self.load(USERS).await?;
        Ok(users.remove(email.as_str()))
    }

    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        self.update(USERS, |users: &mut Keyed<User>| {
            users.insert(user.email.to_string(), user.clone());
        })
        .await
    }
}

#[async_trait]
impl ItemRepository for FileStore {
    async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        let items: Keyed<Item> = self.load(ITEMS).await?;
        Ok(items.into_values().collect())
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let mut items: Keyed<Item> = self.load(ITEMS).await?;
        Ok(items.remove(&id.to_string()))
    }

    async fn save(&self, item: &Item) -> Result<(), RepositoryError> {
        self.update(ITEMS, |items: &mut Keyed<Item>| {
            items.insert(item.id.to_string(), item.clone());
        })
        .await
    }
}

#[async_trait]
impl CartRepository for FileStore {
    async fn get_by_email(&self, email: &Email) -> Result<Option<Cart>, RepositoryError> {
        let mut carts: Keyed<Cart> = self.load(CARTS).await?;
        Ok(carts.remove(email.as_str()))
    }

    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        self.update(CARTS, |carts: &mut Keyed<Cart>| {
            carts.insert(cart.email.to_string(), cart.clone());
        })
        .await
    }
}

#[async_trait]
impl OrderRepository for FileStore {
    async fn place(&self, order: &Order) -> Result<(), RepositoryError> {
        self.update(ORDERS, |orders: &mut Vec<Order>| orders.push(order.clone()))
            .await
    }

    async fn list_by_email(&self, email: &Email) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<Order> = self.load(ORDERS).await?;
        Ok(orders
            .into_iter()
            .filter(|order| &order.email == email)
            .collect())
    }
}
