//! Inventory server: reads settings from env, prepares the store, serves the item API.

use inventory_service::{
    app, ensure_database_exists, ensure_items_table, AppState, ItemService, ItemStore, MemoryItemStore,
    PgItemStore, Settings, StoreKind,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("inventory_service=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let store: Arc<dyn ItemStore> = match settings.store {
        StoreKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            ensure_items_table(&pool, &settings.schema).await?;
            Arc::new(PgItemStore::new(pool, &settings.schema))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory item store; data is lost on exit");
            Arc::new(MemoryItemStore::new())
        }
    };

    let state = AppState {
        items: ItemService::new(store),
        low_stock_threshold: settings.low_stock_threshold,
    };
    let router = app(state, &settings.cors_origins);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
