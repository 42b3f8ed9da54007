pub mod aggregator;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod source;

use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::SqlitePoolOptions;

use crate::{
    config::{DataSourceKind, Settings},
    error::{AppError, Result},
    source::{HttpRecordSource, RecordSource, SqliteRecordSource},
};

/// Build the configured record source. The SQLite store is migrated on
/// connect.
pub async fn connect_source(settings: &Settings) -> Result<Arc<dyn RecordSource>> {
    let cfg = &settings.data_source;
    match cfg.kind {
        DataSourceKind::Sqlite => {
            let pool = SqlitePoolOptions::new()
                .max_connections(cfg.max_connections)
                .connect(&cfg.database_url)
                .await?;
            let source = SqliteRecordSource::new(pool);
            source.migrate().await?;
            tracing::info!("Reading records from SQLite store {}", cfg.database_url);
            Ok(Arc::new(source))
        }
        DataSourceKind::Http => {
            let base_url = cfg.base_url.as_deref().ok_or_else(|| {
                AppError::Internal("data_source.base_url is required for the http source".to_string())
            })?;
            let source = HttpRecordSource::new(
                base_url,
                cfg.api_token.clone(),
                Duration::from_secs(cfg.timeout_secs),
            )?;
            tracing::info!("Reading records from data service {}", base_url);
            Ok(Arc::new(source))
        }
    }
}
