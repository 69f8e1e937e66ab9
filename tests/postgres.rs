//! PgItemStore against a live PostgreSQL. Ignored by default; run with
//! `TEST_DATABASE_URL=postgres://... cargo test --test postgres -- --ignored`.
//! Each test works in its own schema and drops it afterwards.

use inventory_service::{
    ensure_items_table, AppError, CategoryItemCountSummary, CategoryQuantitySummary, Item, ItemStore, PgItemStore,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::{SystemTime, UNIX_EPOCH};

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}

async fn scratch_store(tag: &str) -> Option<(PgItemStore, PgPool, String)> {
    let Some(url) = database_url() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return None;
    };
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().subsec_nanos();
    let schema = format!("inventory_test_{}_{}_{}", tag, std::process::id(), nanos);
    ensure_items_table(&pool, &schema).await.unwrap();
    Some((PgItemStore::new(pool.clone(), &schema), pool, schema))
}

async fn drop_schema(pool: &PgPool, schema: &str) {
    sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", schema))
        .execute(pool)
        .await
        .unwrap();
}

fn item(name: &str, category: &str, quantity: Option<i32>) -> Item {
    Item {
        id: None,
        name: name.into(),
        category: category.into(),
        quantity,
        location: "dock".into(),
        low_stock: false,
    }
}

#[tokio::test]
#[ignore]
async fn aggregates_and_flagging_on_mixed_null_quantities() {
    let Some((store, pool, schema)) = scratch_store("agg").await else {
        return;
    };

    let a2 = store.insert(item("a2", "A", Some(2))).await.unwrap();
    let anull = store.insert(item("anull", "A", None)).await.unwrap();
    let b10 = store.insert(item("b10", "B", Some(10))).await.unwrap();

    assert_eq!(
        store.sum_quantity_by_category().await.unwrap(),
        vec![
            CategoryQuantitySummary {
                category: "A".into(),
                total_quantity: 2
            },
            CategoryQuantitySummary {
                category: "B".into(),
                total_quantity: 10
            },
        ]
    );
    assert_eq!(
        store.count_items_by_category_top5().await.unwrap(),
        vec![
            CategoryItemCountSummary {
                category: "A".into(),
                item_count: 2
            },
            CategoryItemCountSummary {
                category: "B".into(),
                item_count: 1
            },
        ]
    );

    let low: Vec<_> = store.find_low_stock(5).await.unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(low, vec![a2.id]);

    assert_eq!(store.flag_low_stock(5).await.unwrap(), 3);
    for (stored, expected) in [(&a2, true), (&anull, false), (&b10, false)] {
        let fetched = store.find_by_id(stored.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched.low_stock, expected, "{}", fetched.name);
    }

    let asc: Vec<_> = store
        .find_all_ordered_by_quantity(true)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(asc, vec![a2.id, b10.id, anull.id]);
    let desc: Vec<_> = store
        .find_all_ordered_by_quantity(false)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(desc, vec![anull.id, b10.id, a2.id]);

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
#[ignore]
async fn crud_and_update_of_deleted_row() {
    let Some((store, pool, schema)) = scratch_store("crud").await else {
        return;
    };

    let mut supplied = item("bolt", "hw", Some(3));
    supplied.id = Some(999);
    let created = store.insert(supplied).await.unwrap();
    let id = created.id.unwrap();
    assert_ne!(id, 999);

    let mut changed = created.clone();
    changed.name = "nut".into();
    changed.quantity = None;
    assert_eq!(store.update(changed.clone()).await.unwrap(), changed);
    assert_eq!(store.find_by_category("hw").await.unwrap(), vec![changed.clone()]);
    assert!(store.find_by_category("HW").await.unwrap().is_empty());

    store.delete_by_id(id).await.unwrap();
    assert_eq!(store.find_by_id(id).await.unwrap(), None);
    assert!(matches!(store.update(changed).await, Err(AppError::NotFound(got)) if got == id));

    drop_schema(&pool, &schema).await;
}
