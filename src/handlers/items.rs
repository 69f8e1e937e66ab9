//! Item handlers: CRUD, low-stock views, sorting and category summaries.

use crate::error::AppError;
use crate::model::ItemDraft;
use crate::response::{created, ok, ok_many};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Unwrap a JSON body, reporting syntax and shape problems as `bad_request`.
fn draft_from_body(body: Result<Json<ItemDraft>, JsonRejection>) -> Result<ItemDraft, AppError> {
    body.map(|Json(draft)| draft)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub order: Option<String>,
}

impl SortParams {
    /// Only a case-insensitive `desc` sorts descending; anything else, or no value, is ascending.
    pub fn ascending(&self) -> bool {
        !self
            .order
            .as_deref()
            .map(|o| o.eq_ignore_ascii_case("desc"))
            .unwrap_or(false)
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let items = match params.category.as_deref() {
        Some(category) => state.items.list_items_by_category(category).await?,
        None => state.items.list_all_items().await?,
    };
    Ok(ok_many(items))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let draft = draft_from_body(body)?;
    let item = state.items.create_item(draft).await?;
    Ok(created(item))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let item = state.items.get_item_by_id(id).await?;
    Ok(ok(item))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let draft = draft_from_body(body)?;
    let item = state.items.update_item(id, draft).await?;
    Ok(ok(item))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.items.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn refresh_low_stock(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = state.items.flag_low_stock_items(state.low_stock_threshold).await?;
    Ok(ok_many(items))
}

pub async fn low_stock(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = state.items.get_low_stock_items(state.low_stock_threshold).await?;
    Ok(ok_many(items))
}

pub async fn sorted_by_quantity(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<impl IntoResponse, AppError> {
    let items = state.items.get_items_sorted_by_quantity(params.ascending()).await?;
    Ok(ok_many(items))
}

pub async fn quantity_per_category(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.items.get_total_quantity_per_category().await?;
    Ok(ok_many(rows))
}

pub async fn top_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.items.get_top_categories_by_item_count().await?;
    Ok(ok_many(rows))
}
