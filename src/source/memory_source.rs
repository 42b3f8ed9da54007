use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::{
    domain::Collection,
    error::{AppError, Result},
    source::{PageOptions, RawPage, RecordSource, SourceFilter},
};

/// In-process record source for tests, with failure injection and a read
/// counter.
#[derive(Default)]
pub struct InMemoryRecordSource {
    collections: Mutex<HashMap<Collection, Vec<Value>>>,
    failing: Mutex<HashSet<Collection>>,
    fail_once: Mutex<HashSet<Collection>>,
    stalled_cursor: Mutex<HashSet<Collection>>,
    reads: AtomicUsize,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_records(collection: Collection, records: Vec<Value>) -> Self {
        let source = Self::new();
        source.insert_all(collection, records).await;
        source
    }

    pub async fn insert_all(&self, collection: Collection, records: Vec<Value>) {
        self.collections
            .lock()
            .await
            .entry(collection)
            .or_default()
            .extend(records);
    }

    /// Every read of `collection` fails until `recover` is called.
    pub async fn fail(&self, collection: Collection) {
        self.failing.lock().await.insert(collection);
    }

    pub async fn recover(&self, collection: Collection) {
        self.failing.lock().await.remove(&collection);
    }

    /// Only the next read of `collection` fails.
    pub async fn fail_next(&self, collection: Collection) {
        self.fail_once.lock().await.insert(collection);
    }

    /// Pages of `collection` report another page but never advance `nextSkip`.
    pub async fn stall_cursor(&self, collection: Collection) {
        self.stalled_cursor.lock().await.insert(collection);
    }

    /// Number of page and by-id reads served or failed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    async fn check_failure(&self, collection: Collection) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_once.lock().await.remove(&collection)
            || self.failing.lock().await.contains(&collection)
        {
            return Err(AppError::Retrieval(format!(
                "{} is unavailable",
                collection.as_str()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn fetch_page(
        &self,
        collection: Collection,
        filter: &SourceFilter,
        options: PageOptions,
    ) -> Result<RawPage> {
        self.check_failure(collection).await?;
        filter.validate()?;

        let collections = self.collections.lock().await;
        let matching: Vec<&Value> = collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.as_object().map(|o| filter.matches(o)).unwrap_or(false))
                    .collect()
            })
            .unwrap_or_default();

        let items: Vec<Value> = matching
            .iter()
            .skip(options.skip as usize)
            .take(options.limit as usize)
            .map(|r| (*r).clone())
            .collect();
        let end = options.skip.saturating_add(items.len() as u64);
        let has_next = end < matching.len() as u64;

        let next_skip = if self.stalled_cursor.lock().await.contains(&collection) {
            Some(options.skip)
        } else {
            has_next.then_some(end)
        };

        Ok(RawPage {
            items,
            has_next,
            next_skip,
        })
    }

    async fn fetch_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        self.check_failure(collection).await?;

        let collections = self.collections.lock().await;
        Ok(collections.get(&collection).and_then(|records| {
            records
                .iter()
                .find(|r| r.get("_id").and_then(Value::as_str) == Some(id))
                .cloned()
        }))
    }
}
