use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    api::state::AppState,
    error::Result,
    service::club_service::{ClubDirectory, ClubProfile},
};
use super::directory_query;

#[derive(Debug, Deserialize)]
pub struct ClubsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub pages: Option<u32>,
}

pub async fn directory(
    State(state): State<AppState>,
    Query(params): Query<ClubsQuery>,
) -> Result<Json<ClubDirectory>> {
    let query = directory_query(params.search, params.category.as_deref(), params.pages)?;
    Ok(Json(state.service_context.club_service.directory(&query).await))
}

pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClubProfile>> {
    let profile = state.service_context.club_service.profile(&id, Utc::now()).await?;
    Ok(Json(profile))
}
