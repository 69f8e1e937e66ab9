//! Business rules for items: not-found checks, field replacement on update, low-stock flagging.

use crate::error::AppError;
use crate::model::{CategoryItemCountSummary, CategoryQuantitySummary, Item, ItemDraft};
use crate::store::ItemStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        ItemService { store }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// Insert `draft` as a new item. A supplied id is discarded; the store assigns a fresh one.
    pub async fn create_item(&self, draft: ItemDraft) -> Result<Item, AppError> {
        let created = self.store.insert(draft.into_new_item()).await?;
        tracing::info!(id = ?created.id, category = %created.category, "item created");
        Ok(created)
    }

    /// Replace name, category, quantity and location of an existing item. `id` and `lowStock` are kept.
    pub async fn update_item(&self, id: i64, draft: ItemDraft) -> Result<Item, AppError> {
        let existing = self.get_item_by_id(id).await?;
        let updated = self.store.update(existing.with_fields_from(draft)).await?;
        tracing::info!(id, "item updated");
        Ok(updated)
    }

    pub async fn delete_item(&self, id: i64) -> Result<(), AppError> {
        if self.store.find_by_id(id).await?.is_none() {
            tracing::debug!(id, "delete of missing item");
            return Err(AppError::NotFound(id));
        }
        self.store.delete_by_id(id).await?;
        tracing::info!(id, "item deleted");
        Ok(())
    }

    pub async fn get_item_by_id(&self, id: i64) -> Result<Item, AppError> {
        self.store.find_by_id(id).await?.ok_or_else(|| {
            tracing::debug!(id, "item not found");
            AppError::NotFound(id)
        })
    }

    pub async fn list_all_items(&self) -> Result<Vec<Item>, AppError> {
        self.store.find_all().await
    }

    /// Items whose category equals `category` exactly (case-sensitive, untrimmed).
    pub async fn list_items_by_category(&self, category: &str) -> Result<Vec<Item>, AppError> {
        self.store.find_by_category(category).await
    }

    /// Recompute `lowStock` on every item against `threshold`, then return the items now below it.
    ///
    /// The flag write is a single store statement; the returned list comes from a fresh read.
    pub async fn flag_low_stock_items(&self, threshold: i32) -> Result<Vec<Item>, AppError> {
        let touched = self.store.flag_low_stock(threshold).await?;
        let low = self.store.find_low_stock(threshold).await?;
        tracing::info!(threshold, touched, low = low.len(), "low-stock flags refreshed");
        Ok(low)
    }

    /// Items with a known quantity below `threshold`, read live. Ignores the stored flag.
    pub async fn get_low_stock_items(&self, threshold: i32) -> Result<Vec<Item>, AppError> {
        self.store.find_low_stock(threshold).await
    }

    pub async fn get_items_sorted_by_quantity(&self, ascending: bool) -> Result<Vec<Item>, AppError> {
        self.store.find_all_ordered_by_quantity(ascending).await
    }

    pub async fn get_total_quantity_per_category(&self) -> Result<Vec<CategoryQuantitySummary>, AppError> {
        self.store.sum_quantity_by_category().await
    }

    /// At most five categories by descending item count.
    pub async fn get_top_categories_by_item_count(&self) -> Result<Vec<CategoryItemCountSummary>, AppError> {
        self.store.count_items_by_category_top5().await
    }
}
