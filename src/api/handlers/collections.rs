use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    api::state::AppState,
    domain::Collection,
    error::{AppError, Result},
    source::{PageOptions, RawPage, SourceFilter},
};

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub filter: Option<String>, // JSON object of field equalities
}

fn parse_collection(name: &str) -> Result<Collection> {
    Collection::from_str(name)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown collection: {}", name)))
}

pub async fn list_items(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<ItemsQuery>,
) -> Result<Json<RawPage>> {
    let collection = parse_collection(&collection)?;
    let filter = match params.filter.as_deref() {
        Some(raw) if !raw.is_empty() => serde_json::from_str::<SourceFilter>(raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid filter: {}", e)))?,
        _ => SourceFilter::new(),
    };
    let skip = params.skip.unwrap_or(0);
    if i64::try_from(skip).is_err() {
        return Err(AppError::BadRequest(format!("skip {} is out of range", skip)));
    }
    let options = PageOptions {
        limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        skip,
    };

    let page = state
        .service_context
        .source
        .fetch_page(collection, &filter, options)
        .await?;
    Ok(Json(page))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let collection = parse_collection(&collection)?;
    state
        .service_context
        .source
        .fetch_by_id(collection, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} record {} not found", collection.as_str(), id)))
}
