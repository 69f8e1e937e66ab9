//! Item record and the summary rows returned by the aggregate queries.

use serde::{Deserialize, Serialize};

/// A persisted inventory record. `id` is `None` only before the store assigns one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub quantity: Option<i32>,
    pub location: String,
    #[serde(default)]
    pub low_stock: bool,
}

/// Request body for create and update. Any `id` in the body is accepted and ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub quantity: Option<i32>,
    pub location: String,
    #[serde(default)]
    pub low_stock: bool,
}

impl ItemDraft {
    /// Unsaved item built from the draft; the id is always cleared so the store assigns one.
    pub fn into_new_item(self) -> Item {
        Item {
            id: None,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            location: self.location,
            low_stock: self.low_stock,
        }
    }
}

impl Item {
    /// Overwrite name, category, quantity and location from `draft`. Keeps `id` and `low_stock`.
    pub fn with_fields_from(self, draft: ItemDraft) -> Item {
        Item {
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            location: draft.location,
            ..self
        }
    }

    pub fn with_id(self, id: i64) -> Item {
        Item { id: Some(id), ..self }
    }

    pub fn with_low_stock(self, low_stock: bool) -> Item {
        Item { low_stock, ..self }
    }

    /// Low stock means a known quantity strictly below `threshold`; null is never low.
    pub fn is_below(&self, threshold: i32) -> bool {
        matches!(self.quantity, Some(q) if q < threshold)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuantitySummary {
    pub category: String,
    pub total_quantity: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItemCountSummary {
    pub category: String,
    pub item_count: i64,
}
