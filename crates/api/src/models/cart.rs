//! Shopping cart domain type.

use serde::{Deserialize, Serialize};

use corner_store_core::{CartId, Email, ItemId, Price};

use super::Item;

/// A per-email list of item snapshots pending purchase.
///
/// The same item may appear more than once; each entry is one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub email: Email,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Cart {
    /// Create an empty cart for `email`.
    #[must_use]
    pub fn new(email: Email) -> Self {
        Self {
            id: CartId::new_v4(),
            email,
            items: Vec::new(),
        }
    }

    /// Append a snapshot of `item`.
    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove every entry for `item_id`, returning how many were removed.
    pub fn remove_item(&mut self, item_id: ItemId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        before - self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all entry prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::NewItem;

    fn item(name: &str, cents: i64) -> Item {
        Item::new(NewItem {
            name: name.to_owned(),
            description: None,
            price: Price::from_minor_units(cents).unwrap(),
        })
    }

    fn cart() -> Cart {
        Cart::new(Email::parse("test@example.com").unwrap())
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_remove_item_drops_all_duplicates() {
        let mut cart = cart();
        let fork = item("fork", 100);
        let knife = item("knife", 250);
        cart.add(fork.clone());
        cart.add(knife.clone());
        cart.add(fork.clone());

        assert_eq!(cart.remove_item(fork.id), 2);
        assert_eq!(cart.items, vec![knife]);
        assert_eq!(cart.remove_item(fork.id), 0);
    }

    #[test]
    fn test_total_and_clear() {
        let mut cart = cart();
        cart.add(item("fork", 100));
        cart.add(item("knife", 250));
        assert_eq!(cart.total().minor_units(), 350);

        cart.clear();
        assert!(cart.is_empty());
    }
}
