//! JSON response bodies.
//!
//! Prices leave the API as decimal numbers in major units.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use corner_store_core::{Email, ItemId, OrderId};

use crate::models::{Cart, Item, Order};

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_major(),
        }
    }
}

fn item_views(items: &[Item]) -> Vec<ItemView> {
    items.iter().map(ItemView::from).collect()
}

#[derive(Debug, Serialize)]
pub struct ItemsView {
    pub items: Vec<ItemView>,
}

impl ItemsView {
    #[must_use]
    pub fn new(items: &[Item]) -> Self {
        Self {
            items: item_views(items),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub email: Email,
    pub items: Vec<ItemView>,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            email: cart.email.clone(),
            items: item_views(&cart.items),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub email: Email,
    pub items: Vec<ItemView>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            email: order.email.clone(),
            items: item_views(&order.items),
            total: order.total().to_major(),
            placed_at: order.placed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrdersView {
    pub orders: Vec<OrderView>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corner_store_core::Price;
    use serde_json::json;

    use super::*;
    use crate::models::NewItem;

    #[test]
    fn test_item_view_price_is_major_units() {
        let item = Item::new(NewItem {
            name: "ложка".to_owned(),
            description: None,
            price: Price::from_minor_units(120).unwrap(),
        });
        let value = serde_json::to_value(ItemView::from(&item)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": item.id.to_string(),
                "name": "ложка",
                "description": null,
                "price": 1.2,
            })
        );
    }
}
