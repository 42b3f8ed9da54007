pub mod handlers;
pub mod state;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Page views
        .nest("/api", view_routes())

        // Raw collections, in the shape the HTTP record source reads
        .nest("/data", data_routes())

        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(handlers::home::home))
        .route("/clubs", get(handlers::clubs::directory))
        .route("/clubs/:id", get(handlers::clubs::profile))
        .route("/events", get(handlers::events::directory))
        .route("/events/:id", get(handlers::events::detail))
        .route("/announcements", get(handlers::announcements::feed))
}

fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/collections/:collection/items", get(handlers::collections::list_items))
        .route("/collections/:collection/items/:id", get(handlers::collections::get_item))
}
