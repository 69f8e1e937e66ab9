//! Inventory service: item CRUD and stock summaries over a single `items` table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::{CategoryItemCountSummary, CategoryQuantitySummary, Item, ItemDraft};
pub use routes::{app, common_routes_with_ready, item_routes};
pub use service::ItemService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_items_table, ItemStore, MemoryItemStore, PgItemStore};
