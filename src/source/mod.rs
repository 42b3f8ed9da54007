use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::{decode_record, decode_records, Collection, Record};
use crate::error::{AppError, Result};

pub mod http_source;
pub mod sqlite_source;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory_source;

pub use http_source::HttpRecordSource;
pub use sqlite_source::SqliteRecordSource;
#[cfg(any(test, feature = "test-utils"))]
pub use memory_source::InMemoryRecordSource;

/// Skip/limit window of a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    pub limit: u64,
    pub skip: u64,
}

/// One page as the data service returns it, before decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    pub items: Vec<Value>,
    pub has_next: bool,
    #[serde(default)]
    pub next_skip: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub has_next: bool,
    pub next_skip: Option<u64>,
}

/// Field equality filter passed through to the data service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceFilter(BTreeMap<String, Value>);

impl SourceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Field names end up in JSON paths, so only plain identifiers pass.
    pub fn validate(&self) -> Result<()> {
        for field in self.0.keys() {
            let valid = !field.is_empty()
                && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(AppError::BadRequest(format!("Invalid filter field: {:?}", field)));
            }
        }
        Ok(())
    }

    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

/// The data service the pages read from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_page(
        &self,
        collection: Collection,
        filter: &SourceFilter,
        options: PageOptions,
    ) -> Result<RawPage>;

    async fn fetch_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>>;
}

/// Fetch and validate one page of `R`.
pub async fn fetch_records<R: Record>(
    source: &dyn RecordSource,
    filter: &SourceFilter,
    options: PageOptions,
) -> Result<Page<R>> {
    let raw = source.fetch_page(R::COLLECTION, filter, options).await?;
    Ok(Page {
        items: decode_records(raw.items)?,
        has_next: raw.has_next,
        next_skip: raw.next_skip,
    })
}

/// Fetch and validate a single `R`.
pub async fn fetch_record<R: Record>(source: &dyn RecordSource, id: &str) -> Result<Option<R>> {
    source
        .fetch_by_id(R::COLLECTION, id)
        .await?
        .map(decode_record::<R>)
        .transpose()
}
