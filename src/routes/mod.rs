//! Routers: common probes, the item API, and the assembled application.

mod common;
mod items;

pub use common::{common_routes, common_routes_with_ready};
pub use items::item_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Mount point of the item API.
pub const ITEMS_PATH: &str = "/api/items";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application: probes at the root, items under `/api/items`, with tracing, CORS and a body limit.
/// Empty `cors_origins` allows any origin.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let cors = if cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<_> = cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest(ITEMS_PATH, item_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
