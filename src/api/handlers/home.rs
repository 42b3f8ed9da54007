use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    api::state::AppState,
    service::home_service::HomeView,
};

pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    Json(state.service_context.home_service.load(Utc::now()).await)
}
