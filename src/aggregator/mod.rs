//! Per-page accumulation of a paged collection and the views derived from it.
//!
//! An aggregator is built when a page is requested and dropped with it.
//! Retrieval failures never escape: they are logged and leave the state
//! empty (initial load) or unchanged (load more).

use std::sync::Arc;

use crate::{
    domain::Record,
    source::{fetch_records, PageOptions, RecordSource, SourceFilter},
};

pub mod join;
pub mod view;

pub use join::{club_for_event, events_for_club, team_for_club};
pub use view::{derive, derive_filtered, sort_by_date, RecordFilter, TemporalDirection, ViewSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorOptions {
    pub page_size: u64,
    /// Allow paging in more records while a search/category filter is active.
    pub load_more_while_filtered: bool,
}

impl AggregatorOptions {
    pub fn with_page_size(page_size: u64) -> Self {
        Self {
            page_size,
            load_more_while_filtered: false,
        }
    }
}

/// Snapshot of the pagination state, for callers that report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub is_loading: bool,
    pub has_next: bool,
    pub next_skip: u64,
}

pub struct PagedAggregator<R: Record> {
    source: Arc<dyn RecordSource>,
    filter: SourceFilter,
    options: AggregatorOptions,
    items: Vec<R>,
    is_loading: bool,
    has_next: bool,
    next_skip: u64,
}

impl<R: Record> PagedAggregator<R> {
    pub fn new(source: Arc<dyn RecordSource>, options: AggregatorOptions) -> Self {
        Self {
            source,
            filter: SourceFilter::new(),
            options,
            items: Vec::new(),
            is_loading: false,
            has_next: false,
            next_skip: 0,
        }
    }

    /// Restrict what the source returns. Pages always pass the empty filter.
    pub fn with_source_filter(mut self, filter: SourceFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn into_items(self) -> Vec<R> {
        self.items
    }

    pub fn cursor(&self) -> PageCursor {
        PageCursor {
            is_loading: self.is_loading,
            has_next: self.has_next,
            next_skip: self.next_skip,
        }
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether a "load more" is offered for the current user filter.
    pub fn load_more_available(&self, filter: &RecordFilter) -> bool {
        self.has_next
            && !self.is_loading
            && (self.options.load_more_while_filtered || filter.is_identity())
    }

    /// Replace the accumulated set with the first page.
    pub async fn initial_load(&mut self) {
        self.is_loading = true;
        let options = PageOptions {
            limit: self.options.page_size,
            skip: 0,
        };

        match fetch_records::<R>(self.source.as_ref(), &self.filter, options).await {
            Ok(page) => {
                tracing::debug!(
                    "Loaded {} {} records (has_next {})",
                    page.items.len(),
                    R::COLLECTION.as_str(),
                    page.has_next
                );
                self.items = page.items;
                self.apply_cursor(0, page.has_next, page.next_skip);
            }
            Err(e) => {
                tracing::error!("Error loading {}: {}", R::COLLECTION.as_str(), e);
                self.items.clear();
                self.has_next = false;
                self.next_skip = 0;
            }
        }

        self.is_loading = false;
    }

    /// Append the next page. Returns whether a page was appended; without a
    /// next page, or on failure, the set is left as it was.
    pub async fn load_more(&mut self) -> bool {
        if !self.has_next || self.is_loading {
            return false;
        }

        self.is_loading = true;
        let skip = self.next_skip;
        let options = PageOptions {
            limit: self.options.page_size,
            skip,
        };

        let appended = match fetch_records::<R>(self.source.as_ref(), &self.filter, options).await {
            Ok(page) => {
                tracing::debug!(
                    "Loaded {} more {} records at skip {}",
                    page.items.len(),
                    R::COLLECTION.as_str(),
                    skip
                );
                self.items.extend(page.items);
                self.apply_cursor(skip, page.has_next, page.next_skip);
                true
            }
            Err(e) => {
                tracing::error!("Error loading more {}: {}", R::COLLECTION.as_str(), e);
                false
            }
        };

        self.is_loading = false;
        appended
    }

    /// Load the first page, then keep loading until `pages` pages are in or
    /// the source runs out.
    pub async fn load_pages(&mut self, pages: u32) {
        self.initial_load().await;
        for _ in 1..pages {
            if !self.load_more().await {
                break;
            }
        }
    }

    pub fn derive(&self, view: &ViewSpec) -> Vec<R> {
        view::derive(&self.items, view)
    }

    pub fn derive_filtered(&self, view: &ViewSpec, filter: &RecordFilter) -> Vec<R> {
        view::derive_filtered(&self.items, view, filter)
    }

    // The cursor must move forward, otherwise the next load would re-fetch
    // pages already held.
    fn apply_cursor(&mut self, requested_skip: u64, has_next: bool, next_skip: Option<u64>) {
        match (has_next, next_skip) {
            (true, Some(next)) if next > requested_skip => {
                self.has_next = true;
                self.next_skip = next;
            }
            (true, next) => {
                tracing::warn!(
                    "{} source reported another page but cursor {:?} does not advance past {}; stopping",
                    R::COLLECTION.as_str(),
                    next,
                    requested_skip
                );
                self.has_next = false;
            }
            (false, next) => {
                self.has_next = false;
                self.next_skip = next.unwrap_or(0);
            }
        }
    }
}
