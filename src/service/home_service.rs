use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    aggregator::{AggregatorOptions, PagedAggregator, RecordFilter, ViewSpec},
    config::PageConfig,
    domain::{Announcement, Club, Event},
    source::RecordSource,
};

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub upcoming_events: Vec<Event>,
    pub featured_clubs: Vec<Club>,
    pub announcements: Vec<Announcement>,
}

pub struct HomeService {
    source: Arc<dyn RecordSource>,
    pages: PageConfig,
}

impl HomeService {
    pub fn new(source: Arc<dyn RecordSource>, pages: PageConfig) -> Self {
        Self { source, pages }
    }

    /// Fetch the three landing sections in parallel. Each section settles on
    /// its own; a failed one is simply empty.
    pub async fn load(&self, now: DateTime<Utc>) -> HomeView {
        let mut events: PagedAggregator<Event> = PagedAggregator::new(
            self.source.clone(),
            AggregatorOptions::with_page_size(self.pages.home_events_limit),
        );
        let mut clubs: PagedAggregator<Club> = PagedAggregator::new(
            self.source.clone(),
            AggregatorOptions::with_page_size(self.pages.home_clubs_limit),
        );
        let mut announcements: PagedAggregator<Announcement> = PagedAggregator::new(
            self.source.clone(),
            AggregatorOptions::with_page_size(self.pages.home_announcements_limit),
        );

        tokio::join!(
            events.initial_load(),
            clubs.initial_load(),
            announcements.initial_load()
        );

        let mut upcoming_events = events.derive(&ViewSpec::upcoming(now));
        upcoming_events.truncate(self.pages.home_events_limit as usize);

        HomeView {
            upcoming_events,
            featured_clubs: clubs.into_items(),
            announcements: announcements.derive(&ViewSpec::Filter(RecordFilter::default())),
        }
    }
}
