use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    aggregator::{self, AggregatorOptions, PagedAggregator, ViewSpec},
    config::PageConfig,
    domain::{Club, Event, TeamMember},
    error::{AppError, Result},
    source::{fetch_record, RecordSource},
};
use super::{load_directory, DirectoryQuery};

#[derive(Debug, Clone, Serialize)]
pub struct ClubDirectory {
    pub clubs: Vec<Club>,
    pub total_loaded: usize,
    pub has_more: bool,
    pub load_more_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClubProfile {
    pub club: Club,
    pub team_members: Vec<TeamMember>,
    pub upcoming_events: Vec<Event>,
    pub past_events: Vec<Event>,
}

pub struct ClubService {
    source: Arc<dyn RecordSource>,
    pages: PageConfig,
}

impl ClubService {
    pub fn new(source: Arc<dyn RecordSource>, pages: PageConfig) -> Self {
        Self { source, pages }
    }

    pub async fn directory(&self, query: &DirectoryQuery) -> ClubDirectory {
        let aggregator: PagedAggregator<Club> =
            load_directory(&self.source, &self.pages, self.pages.clubs_page_size, query.pages).await;

        let filter = query.filter();
        ClubDirectory {
            clubs: aggregator.derive(&ViewSpec::Filter(filter.clone())),
            total_loaded: aggregator.items().len(),
            has_more: aggregator.has_next(),
            load_more_available: aggregator.load_more_available(&filter),
        }
    }

    /// Club by id plus its events (joined on name) and the team roster.
    pub async fn profile(&self, id: &str, now: DateTime<Utc>) -> Result<ClubProfile> {
        let options = AggregatorOptions::with_page_size(self.pages.profile_fetch_limit);
        let mut events: PagedAggregator<Event> = PagedAggregator::new(self.source.clone(), options);
        let mut team: PagedAggregator<TeamMember> = PagedAggregator::new(self.source.clone(), options);

        let (club, _, _) = tokio::join!(
            fetch_record::<Club>(self.source.as_ref(), id),
            events.initial_load(),
            team.initial_load()
        );

        let club = match club {
            Ok(Some(club)) => club,
            Ok(None) => return Err(AppError::NotFound(format!("Club {} not found", id))),
            Err(e) => {
                tracing::error!("Error loading club {}: {}", id, e);
                return Err(AppError::NotFound(format!("Club {} not found", id)));
            }
        };

        let club_events = aggregator::events_for_club(&club, events.items());
        Ok(ClubProfile {
            team_members: aggregator::team_for_club(&club, team.items()),
            upcoming_events: aggregator::derive(&club_events, &ViewSpec::upcoming(now)),
            past_events: aggregator::derive(&club_events, &ViewSpec::past(now)),
            club,
        })
    }
}
