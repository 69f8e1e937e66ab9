//! Item API routes, relative to `/api/items`.

use crate::handlers::items::{
    create, delete as delete_handler, list, low_stock, quantity_per_category, read, refresh_low_stock,
    sorted_by_quantity, top_categories, update,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn item_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/low-stock", get(low_stock))
        .route("/low-stock/refresh", post(refresh_low_stock))
        .route("/sorted-by-quantity", get(sorted_by_quantity))
        .route("/summary/quantity-per-category", get(quantity_per_category))
        .route("/summary/top-categories", get(top_categories))
        .route("/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
