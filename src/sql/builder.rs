//! Builds the SELECT / INSERT / UPDATE / DELETE statements used by `PgItemStore`.

/// Columns in the order every item query returns them.
pub const ITEM_COLUMNS: &str = r#""id", "name", "category", "quantity", "location", "low_stock""#;

/// Upper bound on rows returned by the top-categories summary.
pub const TOP_CATEGORIES_LIMIT: i64 = 5;

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))
}

pub fn create_database(name: &str) -> String {
    format!("CREATE DATABASE {}", quoted(name))
}

/// DDL for the items table and its category index. Idempotent.
pub fn create_items_table(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            quantity INTEGER,
            location TEXT NOT NULL,
            low_stock BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
        table
    )
}

pub fn create_category_index(schema: &str, table: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} (category)",
        quoted("items_category_idx"),
        qualified_table(schema, table)
    )
}

/// INSERT; params: name, category, quantity, location, low_stock. Returns the stored row.
pub fn insert(table: &str) -> String {
    format!(
        "INSERT INTO {} (name, category, quantity, location, low_stock) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        table, ITEM_COLUMNS
    )
}

/// SELECT by primary key; sole param is the id.
pub fn select_by_id(table: &str) -> String {
    format!("SELECT {} FROM {} WHERE id = $1", ITEM_COLUMNS, table)
}

/// Full overwrite by id; params: id, name, category, quantity, location, low_stock.
pub fn update(table: &str) -> String {
    format!(
        "UPDATE {} SET name = $2, category = $3, quantity = $4, location = $5, low_stock = $6 WHERE id = $1 RETURNING {}",
        table, ITEM_COLUMNS
    )
}

pub fn delete(table: &str) -> String {
    format!("DELETE FROM {} WHERE id = $1", table)
}

pub fn select_all(table: &str) -> String {
    format!("SELECT {} FROM {} ORDER BY id", ITEM_COLUMNS, table)
}

/// Exact, case-sensitive match; sole param is the category.
pub fn select_by_category(table: &str) -> String {
    format!("SELECT {} FROM {} WHERE category = $1 ORDER BY id", ITEM_COLUMNS, table)
}

/// Rows with quantity < $1. Null quantities never match.
pub fn select_low_stock(table: &str) -> String {
    format!("SELECT {} FROM {} WHERE quantity < $1 ORDER BY id", ITEM_COLUMNS, table)
}

/// Ascending puts null quantities last; descending is the exact reverse (nulls first, higher ids first).
pub fn select_ordered_by_quantity(table: &str, ascending: bool) -> String {
    let order = if ascending {
        "quantity ASC NULLS LAST, id ASC"
    } else {
        "quantity DESC NULLS FIRST, id DESC"
    };
    format!("SELECT {} FROM {} ORDER BY {}", ITEM_COLUMNS, table, order)
}

/// One row per category: (category, total_quantity). SUM skips nulls; COALESCE covers all-null groups.
pub fn sum_quantity_by_category(table: &str) -> String {
    format!(
        "SELECT category, COALESCE(SUM(quantity), 0)::BIGINT AS total_quantity FROM {} GROUP BY category ORDER BY category",
        table
    )
}

/// (category, item_count) by descending count, ties by category name; param $1 is the row limit.
pub fn count_by_category_top(table: &str) -> String {
    format!(
        "SELECT category, COUNT(*) AS item_count FROM {} GROUP BY category ORDER BY item_count DESC, category ASC LIMIT $1",
        table
    )
}

/// Recompute `low_stock` for every row in one statement; param $1 is the threshold.
pub fn flag_low_stock(table: &str) -> String {
    format!("UPDATE {} SET low_stock = COALESCE(quantity < $1, FALSE)", table)
}
