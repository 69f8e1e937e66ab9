//! Storage access for items. `ItemStore` is the seam between the service and a backend.

mod memory;
mod postgres;

pub use memory::MemoryItemStore;
pub use postgres::{ensure_database_exists, ensure_items_table, PgItemStore, ITEMS_TABLE};

use crate::error::AppError;
use crate::model::{CategoryItemCountSummary, CategoryQuantitySummary, Item};
use async_trait::async_trait;

/// Operations over the `items` relation.
///
/// Callers check existence before `update` and `delete_by_id`. A row that vanishes before
/// `update` runs is reported as `NotFound`; `delete_by_id` of a missing row is a no-op.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persist a new row. Any id on `item` is ignored; the returned item carries the assigned one.
    async fn insert(&self, item: Item) -> Result<Item, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, AppError>;

    /// Full overwrite of the row keyed by `item.id`.
    async fn update(&self, item: Item) -> Result<Item, AppError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    /// All rows in id order.
    async fn find_all(&self) -> Result<Vec<Item>, AppError>;

    async fn find_by_category(&self, category: &str) -> Result<Vec<Item>, AppError>;

    /// Rows whose quantity is known and below `threshold`.
    async fn find_low_stock(&self, threshold: i32) -> Result<Vec<Item>, AppError>;

    /// Ascending: nulls last, ties by id. Descending: exact reverse.
    async fn find_all_ordered_by_quantity(&self, ascending: bool) -> Result<Vec<Item>, AppError>;

    /// Sum of quantity per category (nulls as 0), ordered by category.
    async fn sum_quantity_by_category(&self) -> Result<Vec<CategoryQuantitySummary>, AppError>;

    /// Item count per category, descending, ties by category name, at most five rows.
    async fn count_items_by_category_top5(&self) -> Result<Vec<CategoryItemCountSummary>, AppError>;

    /// Set `low_stock` on every row to `quantity < threshold` (null quantity is false). Returns rows touched.
    async fn flag_low_stock(&self, threshold: i32) -> Result<u64, AppError>;

    /// Cheap liveness check for the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
