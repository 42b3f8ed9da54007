use serde::Serialize;
use std::sync::Arc;

use crate::{
    aggregator::{PagedAggregator, ViewSpec},
    config::PageConfig,
    domain::Announcement,
    source::RecordSource,
};
use super::load_directory;

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementFeed {
    pub urgent: Vec<Announcement>,
    pub regular: Vec<Announcement>,
    pub total_loaded: usize,
    pub has_more: bool,
}

pub struct AnnouncementService {
    source: Arc<dyn RecordSource>,
    pages: PageConfig,
}

impl AnnouncementService {
    pub fn new(source: Arc<dyn RecordSource>, pages: PageConfig) -> Self {
        Self { source, pages }
    }

    pub async fn feed(&self, pages: u32) -> AnnouncementFeed {
        let aggregator: PagedAggregator<Announcement> = load_directory(
            &self.source,
            &self.pages,
            self.pages.announcements_page_size,
            pages,
        )
        .await;

        AnnouncementFeed {
            urgent: aggregator.derive(&ViewSpec::urgent(true)),
            regular: aggregator.derive(&ViewSpec::urgent(false)),
            total_loaded: aggregator.items().len(),
            has_more: aggregator.has_next(),
        }
    }
}
