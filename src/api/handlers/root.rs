use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": "Campus Hub API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Read-only views over campus clubs, events and announcements",
        "status": "operational",
        "data_source": state.settings.data_source.kind,
        "endpoints": {
            "health": "/health",
            "home": "/api/home",
            "clubs": "/api/clubs",
            "events": "/api/events",
            "announcements": "/api/announcements",
            "data": "/data/collections/{collection}/items"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
