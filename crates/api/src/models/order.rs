//! Order domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use corner_store_core::{Email, OrderId, Price};

use super::{Cart, Item};

/// An immutable snapshot of a cart taken at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub email: Email,
    pub items: Vec<Item>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot the contents of `cart` into a new order.
    ///
    /// The cart itself is left untouched; emptying it is the caller's job.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            id: OrderId::new_v4(),
            email: cart.email.clone(),
            items: cart.items.clone(),
            placed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }
}
