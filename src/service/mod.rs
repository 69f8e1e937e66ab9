//! ItemService: item CRUD and stock summaries over an `ItemStore`.

mod items;
pub use items::ItemService;
