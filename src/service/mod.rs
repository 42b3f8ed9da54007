pub mod home_service;
pub mod club_service;
pub mod event_service;
pub mod announcement_service;

use std::sync::Arc;

use crate::aggregator::{AggregatorOptions, PagedAggregator, RecordFilter};
use crate::config::PageConfig;
use crate::domain::{CategoryFilter, Record};
use crate::source::RecordSource;
use home_service::HomeService;
use club_service::ClubService;
use event_service::EventService;
use announcement_service::AnnouncementService;

pub struct ServiceContext {
    pub source: Arc<dyn RecordSource>,
    pub home_service: Arc<HomeService>,
    pub club_service: Arc<ClubService>,
    pub event_service: Arc<EventService>,
    pub announcement_service: Arc<AnnouncementService>,
}

impl ServiceContext {
    pub fn new(source: Arc<dyn RecordSource>, pages: PageConfig) -> Self {
        let home_service = Arc::new(HomeService::new(source.clone(), pages.clone()));
        let club_service = Arc::new(ClubService::new(source.clone(), pages.clone()));
        let event_service = Arc::new(EventService::new(source.clone(), pages.clone()));
        let announcement_service = Arc::new(AnnouncementService::new(source.clone(), pages));

        Self {
            source,
            home_service,
            club_service,
            event_service,
            announcement_service,
        }
    }
}

/// Search, category and how many pages the user has loaded so far.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryQuery {
    pub search: Option<String>,
    pub category: CategoryFilter,
    pub pages: u32,
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: CategoryFilter::All,
            pages: 1,
        }
    }
}

impl DirectoryQuery {
    pub fn filter(&self) -> RecordFilter {
        RecordFilter::new(self.search.clone(), self.category)
    }
}

/// Build an aggregator for one request and page in `pages` pages.
pub(crate) async fn load_directory<R: Record>(
    source: &Arc<dyn RecordSource>,
    pages: &PageConfig,
    page_size: u64,
    requested_pages: u32,
) -> PagedAggregator<R> {
    let mut aggregator = PagedAggregator::new(
        source.clone(),
        AggregatorOptions {
            page_size,
            load_more_while_filtered: pages.load_more_while_filtered,
        },
    );
    aggregator
        .load_pages(requested_pages.clamp(1, pages.max_pages.max(1)))
        .await;
    aggregator
}
