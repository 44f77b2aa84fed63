//! Catalog item domain types.

use serde::{Deserialize, Serialize};

use corner_store_core::{ItemId, Price};

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price.
    pub price: Price,
}

/// Data for a new catalog item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
}

/// A partial update to an item. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
}

impl Item {
    /// Create an item with a freshly generated ID.
    #[must_use]
    pub fn new(new: NewItem) -> Self {
        Self {
            id: ItemId::new_v4(),
            name: new.name,
            description: new.description,
            price: new.price,
        }
    }

    /// Overwrite the fields present in `changes`.
    pub fn apply(&mut self, changes: ItemChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spoon() -> Item {
        Item::new(NewItem {
            name: "spoon".to_owned(),
            description: None,
            price: Price::from_minor_units(120).unwrap(),
        })
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut item = spoon();
        let id = item.id;
        item.apply(ItemChanges {
            description: Some("silver".to_owned()),
            ..ItemChanges::default()
        });

        assert_eq!(item.id, id);
        assert_eq!(item.name, "spoon");
        assert_eq!(item.description.as_deref(), Some("silver"));
        assert_eq!(item.price.minor_units(), 120);
    }

    #[test]
    fn test_apply_empty_changes_is_noop() {
        let mut item = spoon();
        let before = item.clone();
        item.apply(ItemChanges::default());
        assert_eq!(item, before);
    }
}
