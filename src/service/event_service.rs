use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    aggregator::{self, AggregatorOptions, PagedAggregator, TemporalDirection, ViewSpec},
    config::PageConfig,
    domain::{Club, Event},
    error::{AppError, Result},
    source::{fetch_record, RecordSource},
};
use super::{load_directory, DirectoryQuery};

#[derive(Debug, Clone, Serialize)]
pub struct EventDirectory {
    pub events: Vec<Event>,
    pub upcoming_count: usize,
    pub past_count: usize,
    pub total_loaded: usize,
    pub has_more: bool,
    pub load_more_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    pub event: Event,
    pub is_past: bool,
    pub organizing_club: Option<Club>,
    pub registration_open: bool,
}

pub struct EventService {
    source: Arc<dyn RecordSource>,
    pages: PageConfig,
}

impl EventService {
    pub fn new(source: Arc<dyn RecordSource>, pages: PageConfig) -> Self {
        Self { source, pages }
    }

    /// Upcoming or past events after search and category filtering. The tab
    /// counts are taken before filtering.
    pub async fn directory(
        &self,
        direction: TemporalDirection,
        query: &DirectoryQuery,
        now: DateTime<Utc>,
    ) -> EventDirectory {
        let aggregator: PagedAggregator<Event> =
            load_directory(&self.source, &self.pages, self.pages.events_page_size, query.pages).await;

        let upcoming = aggregator.derive(&ViewSpec::upcoming(now));
        let past = aggregator.derive(&ViewSpec::past(now));
        let view = ViewSpec::Temporal {
            relative_to: now,
            direction,
        };
        let filter = query.filter();

        EventDirectory {
            events: aggregator.derive_filtered(&view, &filter),
            upcoming_count: upcoming.len(),
            past_count: past.len(),
            total_loaded: aggregator.items().len(),
            has_more: aggregator.has_next(),
            load_more_available: aggregator.load_more_available(&filter),
        }
    }

    pub async fn detail(&self, id: &str, now: DateTime<Utc>) -> Result<EventDetail> {
        let event = match fetch_record::<Event>(self.source.as_ref(), id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(AppError::NotFound(format!("Event {} not found", id))),
            Err(e) => {
                tracing::error!("Error loading event {}: {}", id, e);
                return Err(AppError::NotFound(format!("Event {} not found", id)));
            }
        };

        let organizing_club = if event.organizing_club_name.is_some() {
            let mut clubs: PagedAggregator<Club> = PagedAggregator::new(
                self.source.clone(),
                AggregatorOptions::with_page_size(self.pages.profile_fetch_limit),
            );
            clubs.initial_load().await;
            aggregator::club_for_event(&event, clubs.items()).cloned()
        } else {
            None
        };

        let is_past = event.is_past(now);
        Ok(EventDetail {
            registration_open: event.registration_link.is_some() && !is_past,
            is_past,
            organizing_club,
            event,
        })
    }
}
