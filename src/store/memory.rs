//! Process-local `ItemStore` with the same ordering and null rules as the PostgreSQL queries.

use super::ItemStore;
use crate::error::AppError;
use crate::model::{CategoryItemCountSummary, CategoryQuantitySummary, Item};
use crate::sql::TOP_CATEGORIES_LIMIT;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Item>,
    last_id: i64,
}

/// Items kept in a `BTreeMap` keyed by id, so full scans come back in id order.
#[derive(Default)]
pub struct MemoryItemStore {
    table: RwLock<Table>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(|e| e.into_inner())
    }

    fn collect_where<F>(&self, keep: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        self.read().rows.values().filter(|i| keep(i)).cloned().collect()
    }
}

/// Ascending quantity with nulls after every known value; equal quantities by id.
fn ascending_by_quantity(a: &Item, b: &Item) -> Ordering {
    let by_quantity = match (a.quantity, b.quantity) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_quantity.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, item: Item) -> Result<Item, AppError> {
        let mut table = self.write();
        table.last_id += 1;
        let id = table.last_id;
        let stored = item.with_id(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, AppError> {
        Ok(self.read().rows.get(&id).cloned())
    }

    async fn update(&self, item: Item) -> Result<Item, AppError> {
        let id = item
            .id
            .ok_or_else(|| AppError::BadRequest("update requires a persisted item".into()))?;
        match self.write().rows.get_mut(&id) {
            Some(row) => {
                *row = item.clone();
                Ok(item)
            }
            None => Err(AppError::NotFound(id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.write().rows.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        Ok(self.collect_where(|_| true))
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Item>, AppError> {
        Ok(self.collect_where(|i| i.category == category))
    }

    async fn find_low_stock(&self, threshold: i32) -> Result<Vec<Item>, AppError> {
        Ok(self.collect_where(|i| i.is_below(threshold)))
    }

    async fn find_all_ordered_by_quantity(&self, ascending: bool) -> Result<Vec<Item>, AppError> {
        let mut items = self.collect_where(|_| true);
        items.sort_by(ascending_by_quantity);
        if !ascending {
            items.reverse();
        }
        Ok(items)
    }

    async fn sum_quantity_by_category(&self) -> Result<Vec<CategoryQuantitySummary>, AppError> {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for item in self.read().rows.values() {
            *totals.entry(item.category.clone()).or_insert(0) += i64::from(item.quantity.unwrap_or(0));
        }
        Ok(totals
            .into_iter()
            .map(|(category, total_quantity)| CategoryQuantitySummary {
                category,
                total_quantity,
            })
            .collect())
    }

    async fn count_items_by_category_top5(&self) -> Result<Vec<CategoryItemCountSummary>, AppError> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for item in self.read().rows.values() {
            *counts.entry(item.category.clone()).or_insert(0) += 1;
        }
        let mut rows: Vec<CategoryItemCountSummary> = counts
            .into_iter()
            .map(|(category, item_count)| CategoryItemCountSummary { category, item_count })
            .collect();
        rows.sort_by(|a, b| b.item_count.cmp(&a.item_count).then_with(|| a.category.cmp(&b.category)));
        rows.truncate(TOP_CATEGORIES_LIMIT as usize);
        Ok(rows)
    }

    async fn flag_low_stock(&self, threshold: i32) -> Result<u64, AppError> {
        let mut table = self.write();
        for item in table.rows.values_mut() {
            item.low_stock = item.is_below(threshold);
        }
        Ok(table.rows.len() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, quantity: Option<i32>) -> Item {
        Item {
            id: Some(99),
            name: format!("{}-{:?}", category, quantity),
            category: category.into(),
            quantity,
            location: "shelf".into(),
            low_stock: false,
        }
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids_ignoring_supplied_one() {
        let store = MemoryItemStore::new();
        let a = store.insert(item("A", Some(1))).await.unwrap();
        let b = store.insert(item("A", Some(2))).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryItemStore::new();
        let a = store.insert(item("A", Some(1))).await.unwrap();
        store.delete_by_id(a.id.unwrap()).await.unwrap();
        let b = store.insert(item("A", Some(1))).await.unwrap();
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn update_of_vanished_row_is_not_found() {
        let store = MemoryItemStore::new();
        let stored = store.insert(item("A", Some(1))).await.unwrap();
        store.delete_by_id(1).await.unwrap();
        assert!(matches!(store.update(stored).await, Err(AppError::NotFound(1))));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ordering_puts_nulls_last_ascending_and_first_descending() {
        let store = MemoryItemStore::new();
        for q in [Some(3), None, Some(1), Some(3)] {
            store.insert(item("A", q)).await.unwrap();
        }
        let asc: Vec<_> = store
            .find_all_ordered_by_quantity(true)
            .await
            .unwrap()
            .into_iter()
            .map(|i| (i.id.unwrap(), i.quantity))
            .collect();
        assert_eq!(asc, vec![(3, Some(1)), (1, Some(3)), (4, Some(3)), (2, None)]);

        let desc: Vec<_> = store
            .find_all_ordered_by_quantity(false)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id.unwrap())
            .collect();
        assert_eq!(desc, vec![2, 4, 1, 3]);
    }

    #[tokio::test]
    async fn top_categories_breaks_ties_by_name() {
        let store = MemoryItemStore::new();
        for cat in ["g", "f", "e", "d", "c", "b", "a", "a"] {
            store.insert(item(cat, Some(1))).await.unwrap();
        }
        let top: Vec<_> = store
            .count_items_by_category_top5()
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.category, r.item_count))
            .collect();
        assert_eq!(
            top,
            vec![
                ("a".to_string(), 2),
                ("b".to_string(), 1),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
                ("e".to_string(), 1)
            ]
        );
    }
}
