//! HTTP handlers for the item endpoints.

pub mod items;
pub use items::*;
