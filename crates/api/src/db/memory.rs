//! In-memory backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use corner_store_core::{Email, ItemId};

use super::{CartRepository, ItemRepository, OrderRepository, RepositoryError, UserRepository};
use crate::models::{Cart, Item, Order, User};

/// Process-local maps behind async locks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<BTreeMap<Email, User>>,
    items: RwLock<BTreeMap<ItemId, Item>>,
    carts: RwLock<BTreeMap<Email, Cart>>,
    orders: RwLock<Vec<Order>>,
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        self.users
            .write()
            .await
            .insert(user.email.clone(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn save(&self, item: &Item) -> Result<(), RepositoryError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(())
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn get_by_email(&self, email: &Email) -> Result<Option<Cart>, RepositoryError> {
        Ok(self.carts.read().await.get(email).cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        self.carts
            .write()
            .await
            .insert(cart.email.clone(), cart.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn place(&self, order: &Order) -> Result<(), RepositoryError> {
        self.orders.write().await.push(order.clone());
        Ok(())
    }

    async fn list_by_email(&self, email: &Email) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| &order.email == email)
            .cloned()
            .collect())
    }
}
