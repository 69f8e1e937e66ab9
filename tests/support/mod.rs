#![allow(dead_code)]

use inventory_service::{ItemDraft, ItemService, MemoryItemStore};
use std::sync::Arc;

pub fn service() -> ItemService {
    ItemService::new(Arc::new(MemoryItemStore::new()))
}

pub fn draft(name: &str, category: &str, quantity: Option<i32>) -> ItemDraft {
    ItemDraft {
        id: None,
        name: name.into(),
        category: category.into(),
        quantity,
        location: "warehouse-1".into(),
        low_stock: false,
    }
}
