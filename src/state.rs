//! Shared application state for all routes.

use crate::service::ItemService;

#[derive(Clone)]
pub struct AppState {
    pub items: ItemService,
    /// Threshold used by the low-stock endpoints.
    pub low_stock_threshold: i32,
}
