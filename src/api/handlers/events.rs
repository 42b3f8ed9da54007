use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    aggregator::TemporalDirection,
    api::state::AppState,
    error::{AppError, Result},
    service::event_service::{EventDetail, EventDirectory},
};
use super::directory_query;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    #[serde(rename = "type")]
    pub event_type: Option<String>, // "upcoming" (default) or "past"
    pub search: Option<String>,
    pub category: Option<String>,
    pub pages: Option<u32>,
}

pub async fn directory(
    State(state): State<AppState>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<EventDirectory>> {
    let direction = match params.event_type.as_deref() {
        None | Some("") => TemporalDirection::Upcoming,
        Some(value) => TemporalDirection::from_str(value)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown event type: {}", value)))?,
    };
    let query = directory_query(params.search, params.category.as_deref(), params.pages)?;

    let directory = state
        .service_context
        .event_service
        .directory(direction, &query, Utc::now())
        .await;
    Ok(Json(directory))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventDetail>> {
    let detail = state.service_context.event_service.detail(&id, Utc::now()).await?;
    Ok(Json(detail))
}
