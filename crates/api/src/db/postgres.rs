//! `PostgreSQL` backend.
//!
//! Tables live in the `store` schema created by `migrations/`. Cart and order
//! contents are item snapshots, so they are kept as JSONB arrays rather than
//! foreign keys into `store.items`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use corner_store_core::{
    CartId, Email, ItemId, OrderId, PasswordDigest, Price, Role, UserId,
};

use super::{CartRepository, ItemRepository, OrderRepository, RepositoryError, UserRepository};
use crate::models::{Cart, Item, Order, User};

/// Repositories backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: Email,
    role: String,
    password_salt: Option<String>,
    password_hash: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("{e}")))?;

        let password = match (row.password_salt, row.password_hash) {
            (Some(salt), Some(hash)) => Some(PasswordDigest::from_parts(salt, hash)),
            (None, None) => None,
            _ => {
                return Err(RepositoryError::DataCorruption(format!(
                    "user {} has a partial password digest",
                    row.id
                )));
            }
        };

        Ok(Self {
            id: row.id,
            email: row.email,
            role,
            password,
        })
    }
}

#[async_trait]
impl UserRepository for PgStore {
    #[tracing::instrument(skip_all, fields(email = %email))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, role, password_salt, password_hash
            FROM store.users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let digest = user.password.as_ref();
        sqlx::query(
            r"
            INSERT INTO store.users (id, email, role, password_salt, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO UPDATE
            SET role = EXCLUDED.role,
                password_salt = EXCLUDED.password_salt,
                password_hash = EXCLUDED.password_hash,
                updated_at = NOW()
            ",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(digest.map(PasswordDigest::salt))
        .bind(digest.map(PasswordDigest::hash))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Items
// =============================================================================

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: ItemId,
    name: String,
    description: Option<String>,
    price: i64,
}

impl TryFrom<ItemRow> for Item {
    type Error = RepositoryError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let price = Price::from_minor_units(row.price)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid price in database: {e}")))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
        })
    }
}

#[async_trait]
impl ItemRepository for PgStore {
    async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, description, price
            FROM store.items
            ORDER BY name, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, description, price
            FROM store.items
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
    async fn save(&self, item: &Item) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO store.items (id, name, description, price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                updated_at = NOW()
            ",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.description.as_deref())
        .bind(item.price.minor_units())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Carts
// =============================================================================

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    email: Email,
    items: Json<Vec<Item>>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            items: row.items.0,
        }
    }
}

#[async_trait]
impl CartRepository for PgStore {
    #[tracing::instrument(skip_all, fields(email = %email))]
    async fn get_by_email(&self, email: &Email) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, email, items
            FROM store.carts
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    #[tracing::instrument(skip(self, cart), fields(email = %cart.email))]
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO store.carts (id, email, items)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET items = EXCLUDED.items,
                updated_at = NOW()
            ",
        )
        .bind(cart.id)
        .bind(&cart.email)
        .bind(Json(&cart.items))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    email: Email,
    items: Json<Vec<Item>>,
    placed_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            items: row.items.0,
            placed_at: row.placed_at,
        }
    }
}

#[async_trait]
impl OrderRepository for PgStore {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id))]
    async fn place(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO store.orders (id, email, items, placed_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(order.id)
        .bind(&order.email)
        .bind(Json(&order.items))
        .bind(order.placed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(email = %email))]
    async fn list_by_email(&self, email: &Email) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, email, items, placed_at
            FROM store.orders
            WHERE email = $1
            ORDER BY placed_at, id
            ",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
