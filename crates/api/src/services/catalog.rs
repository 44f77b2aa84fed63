//! Catalog service.

use tracing::instrument;

use corner_store_core::ItemId;

use super::ServiceError;
use crate::db::{ItemRepository, Repositories};
use crate::models::{Item, ItemChanges, NewItem};

/// Reads and edits the item catalog.
///
/// Authorization is checked by the caller with
/// [`AuthService::authorize`](super::AuthService::authorize).
pub struct CatalogService<'a> {
    items: &'a dyn ItemRepository,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub fn new(repos: &'a Repositories) -> Self {
        Self {
            items: repos.items(),
        }
    }

    /// All items, ordered by name and then ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the items cannot be read.
    pub async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        let mut items = self.items.list().await?;
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    /// Add a new item to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the item cannot be saved.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create_item(&self, new: NewItem) -> Result<Item, ServiceError> {
        let item = Item::new(new);
        self.items.save(&item).await?;
        tracing::info!(item_id = %item.id, "Item created");
        Ok(item)
    }

    /// Overwrite the provided fields of an existing item.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::ItemNotFound` if no item has this ID.
    /// Returns `ServiceError::Repository` on storage failure.
    #[instrument(skip(self, changes))]
    pub async fn change_item(
        &self,
        item_id: ItemId,
        changes: ItemChanges,
    ) -> Result<Item, ServiceError> {
        let mut item = self
            .items
            .get(item_id)
            .await?
            .ok_or(ServiceError::ItemNotFound(item_id))?;

        item.apply(changes);
        self.items.save(&item).await?;
        tracing::info!("Item changed");
        Ok(item)
    }
}
