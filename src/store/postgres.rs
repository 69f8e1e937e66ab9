//! PostgreSQL-backed `ItemStore` and the startup DDL for the items table.

use super::ItemStore;
use crate::error::{AppError, ConfigError};
use crate::model::{CategoryItemCountSummary, CategoryQuantitySummary, Item};
use crate::sql;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;

pub const ITEMS_TABLE: &str = "items";

#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
    /// Schema-qualified, quoted table name.
    table: String,
}

impl PgItemStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgItemStore {
            pool,
            table: sql::qualified_table(schema, ITEMS_TABLE),
        }
    }

    async fn fetch_items(&self, sql: &str) -> Result<Vec<Item>, AppError> {
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.iter().map(item_from_row).collect()
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn insert(&self, item: Item) -> Result<Item, AppError> {
        let q = sql::insert(&self.table);
        tracing::debug!(sql = %q, "query");
        let row = sqlx::query(&q)
            .bind(&item.name)
            .bind(&item.category)
            .bind(item.quantity)
            .bind(&item.location)
            .bind(item.low_stock)
            .fetch_one(&self.pool)
            .await?;
        item_from_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, AppError> {
        let q = sql::select_by_id(&self.table);
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query(&q).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(item_from_row).transpose()
    }

    async fn update(&self, item: Item) -> Result<Item, AppError> {
        let id = item
            .id
            .ok_or_else(|| AppError::BadRequest("update requires a persisted item".into()))?;
        let q = sql::update(&self.table);
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query(&q)
            .bind(id)
            .bind(&item.name)
            .bind(&item.category)
            .bind(item.quantity)
            .bind(&item.location)
            .bind(item.low_stock)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => item_from_row(&row),
            None => Err(AppError::NotFound(id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let q = sql::delete(&self.table);
        tracing::debug!(sql = %q, id, "query");
        sqlx::query(&q).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        self.fetch_items(&sql::select_all(&self.table)).await
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Item>, AppError> {
        let q = sql::select_by_category(&self.table);
        tracing::debug!(sql = %q, category, "query");
        let rows = sqlx::query(&q).bind(category).fetch_all(&self.pool).await?;
        rows.iter().map(item_from_row).collect()
    }

    async fn find_low_stock(&self, threshold: i32) -> Result<Vec<Item>, AppError> {
        let q = sql::select_low_stock(&self.table);
        tracing::debug!(sql = %q, threshold, "query");
        let rows = sqlx::query(&q).bind(threshold).fetch_all(&self.pool).await?;
        rows.iter().map(item_from_row).collect()
    }

    async fn find_all_ordered_by_quantity(&self, ascending: bool) -> Result<Vec<Item>, AppError> {
        self.fetch_items(&sql::select_ordered_by_quantity(&self.table, ascending))
            .await
    }

    async fn sum_quantity_by_category(&self) -> Result<Vec<CategoryQuantitySummary>, AppError> {
        let q = sql::sum_quantity_by_category(&self.table);
        tracing::debug!(sql = %q, "query");
        let rows = sqlx::query(&q).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|r| -> Result<CategoryQuantitySummary, AppError> {
                Ok(CategoryQuantitySummary {
                    category: r.try_get("category")?,
                    total_quantity: r.try_get::<Option<i64>, _>("total_quantity")?.unwrap_or(0),
                })
            })
            .collect()
    }

    async fn count_items_by_category_top5(&self) -> Result<Vec<CategoryItemCountSummary>, AppError> {
        let q = sql::count_by_category_top(&self.table);
        tracing::debug!(sql = %q, "query");
        let rows = sqlx::query(&q)
            .bind(sql::TOP_CATEGORIES_LIMIT)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|r| -> Result<CategoryItemCountSummary, AppError> {
                Ok(CategoryItemCountSummary {
                    category: r.try_get("category")?,
                    item_count: r.try_get::<Option<i64>, _>("item_count")?.unwrap_or(0),
                })
            })
            .collect()
    }

    async fn flag_low_stock(&self, threshold: i32) -> Result<u64, AppError> {
        let q = sql::flag_low_stock(&self.table);
        tracing::debug!(sql = %q, threshold, "query");
        let result = sqlx::query(&q).bind(threshold).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn item_from_row(row: &PgRow) -> Result<Item, AppError> {
    Ok(Item {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        quantity: row.try_get("quantity")?,
        location: row.try_get("location")?,
        low_stock: row.try_get("low_stock")?,
    })
}

/// Create `schema` if missing, then the items table and its category index.
pub async fn ensure_items_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&sql::create_schema(schema)).execute(pool).await?;
    let table = sql::qualified_table(schema, ITEMS_TABLE);
    sqlx::query(&sql::create_items_table(&table)).execute(pool).await?;
    sqlx::query(&sql::create_category_index(schema, ITEMS_TABLE))
        .execute(pool)
        .await?;
    tracing::info!(table = %table, "items table ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = admin_connect_options(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&sql::create_database(&db_name))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| invalid_database_url(url))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn admin_connect_options(admin_url: &str) -> Result<PgConnectOptions, ConfigError> {
    PgConnectOptions::from_str(admin_url).map_err(|_| invalid_database_url(admin_url))
}

/// The URL may carry credentials, so only its length is reported.
fn invalid_database_url(url: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: format!("<{} chars, redacted>", url.len()),
    }
}
