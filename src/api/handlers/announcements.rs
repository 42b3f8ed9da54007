use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    service::announcement_service::AnnouncementFeed,
};

#[derive(Debug, Deserialize)]
pub struct AnnouncementsQuery {
    pub pages: Option<u32>,
}

pub async fn feed(
    State(state): State<AppState>,
    Query(params): Query<AnnouncementsQuery>,
) -> Json<AnnouncementFeed> {
    let pages = params.pages.unwrap_or(1).max(1);
    Json(state.service_context.announcement_service.feed(pages).await)
}
