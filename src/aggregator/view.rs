use chrono::{DateTime, Utc};

use crate::domain::{CategoryFilter, Record, RecordFlag, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalDirection {
    Upcoming,
    Past,
}

impl TemporalDirection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "upcoming" => Some(TemporalDirection::Upcoming),
            "past" => Some(TemporalDirection::Past),
            _ => None,
        }
    }
}

/// Search text and category as entered on a directory page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub text: Option<String>,
    pub category: CategoryFilter,
}

impl RecordFilter {
    pub fn new(text: Option<String>, category: CategoryFilter) -> Self {
        Self { text, category }
    }

    /// True when the filter lets every record through.
    pub fn is_identity(&self) -> bool {
        self.query().is_none() && self.category.is_all()
    }

    fn query(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let matches_text = match self.query() {
            None => true,
            Some(query) => {
                let needle = query.to_lowercase();
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        };
        matches_text && self.category.matches(record.category())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewSpec {
    /// Records with a date split at `relative_to`; a tie counts as upcoming
    /// and undated records belong to neither side.
    Temporal {
        relative_to: DateTime<Utc>,
        direction: TemporalDirection,
    },
    Flag {
        flag: RecordFlag,
        value: bool,
    },
    Filter(RecordFilter),
}

impl ViewSpec {
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        ViewSpec::Temporal {
            relative_to: now,
            direction: TemporalDirection::Upcoming,
        }
    }

    pub fn past(now: DateTime<Utc>) -> Self {
        ViewSpec::Temporal {
            relative_to: now,
            direction: TemporalDirection::Past,
        }
    }

    pub fn urgent(value: bool) -> Self {
        ViewSpec::Flag {
            flag: RecordFlag::Urgent,
            value,
        }
    }

    pub fn includes<R: Record>(&self, record: &R) -> bool {
        match self {
            ViewSpec::Temporal {
                relative_to,
                direction,
            } => match (record.date(), direction) {
                (None, _) => false,
                (Some(date), TemporalDirection::Upcoming) => date >= *relative_to,
                (Some(date), TemporalDirection::Past) => date < *relative_to,
            },
            ViewSpec::Flag { flag, value } => record.flag(*flag) == *value,
            ViewSpec::Filter(filter) => filter.matches(record),
        }
    }

    pub fn sort_direction<R: Record>(&self) -> SortDirection {
        match self {
            ViewSpec::Temporal {
                direction: TemporalDirection::Upcoming,
                ..
            } => SortDirection::Ascending,
            ViewSpec::Temporal {
                direction: TemporalDirection::Past,
                ..
            } => SortDirection::Descending,
            ViewSpec::Flag { .. } => SortDirection::Descending,
            ViewSpec::Filter(_) => R::DEFAULT_SORT,
        }
    }
}

/// Missing dates compare as the epoch.
fn sort_key<R: Record>(record: &R) -> i64 {
    record.date().map(|d| d.timestamp_millis()).unwrap_or(0)
}

/// Stable sort by the record date.
pub fn sort_by_date<R: Record>(records: &mut [R], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => records.sort_by_key(sort_key),
        SortDirection::Descending => records.sort_by(|a, b| sort_key(b).cmp(&sort_key(a))),
    }
}

pub fn derive<R: Record>(items: &[R], view: &ViewSpec) -> Vec<R> {
    let mut out: Vec<R> = items.iter().filter(|r| view.includes(*r)).cloned().collect();
    sort_by_date(&mut out, view.sort_direction::<R>());
    out
}

/// Partition by `view`, narrow with `filter`, then sort the way `view` sorts.
pub fn derive_filtered<R: Record>(items: &[R], view: &ViewSpec, filter: &RecordFilter) -> Vec<R> {
    let mut out: Vec<R> = items
        .iter()
        .filter(|r| view.includes(*r) && filter.matches(*r))
        .cloned()
        .collect();
    sort_by_date(&mut out, view.sort_direction::<R>());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{decode_record, Announcement, Category, Club, Event};
    use chrono::TimeZone;
    use serde_json::json;

    fn event(id: &str, date: Option<&str>) -> Event {
        let mut value = json!({ "_id": id, "eventName": format!("Event {}", id) });
        if let Some(date) = date {
            value["eventDateTime"] = json!(date);
        }
        decode_record(value).unwrap()
    }

    fn announcement(id: &str, urgent: bool, date: &str) -> Announcement {
        decode_record(json!({
            "_id": id,
            "title": format!("Notice {}", id),
            "isUrgent": urgent,
            "publishDate": date
        }))
        .unwrap()
    }

    fn ids<R: Record>(records: &[R]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    fn feb_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_upcoming_and_past_scenario() {
        let events = vec![
            event("jan", Some("2025-01-10T00:00:00Z")),
            event("mar", Some("2025-03-01T00:00:00Z")),
            event("none", None),
        ];

        assert_eq!(ids(&derive(&events, &ViewSpec::upcoming(feb_first()))), vec!["mar"]);
        assert_eq!(ids(&derive(&events, &ViewSpec::past(feb_first()))), vec!["jan"]);
    }

    #[test]
    fn test_temporal_partition_is_total_for_dated_records() {
        let events = vec![
            event("a", Some("2025-01-31T23:59:59Z")),
            event("b", Some("2025-02-01T00:00:00Z")),
            event("c", None),
            event("d", Some("2026-06-01T00:00:00Z")),
            event("e", Some("1969-07-20T20:17:00Z")),
        ];
        let upcoming = derive(&events, &ViewSpec::upcoming(feb_first()));
        let past = derive(&events, &ViewSpec::past(feb_first()));

        for e in events.iter().filter(|e| e.date_time.is_some()) {
            let in_upcoming = upcoming.iter().any(|u| u.id == e.id);
            let in_past = past.iter().any(|p| p.id == e.id);
            assert!(in_upcoming ^ in_past, "{} must be in exactly one partition", e.id);
        }
        // Undated records are excluded from both sides.
        assert!(!upcoming.iter().chain(past.iter()).any(|r| r.id == "c"));
        // A tie at `now` is upcoming.
        assert_eq!(ids(&upcoming), vec!["b", "d"]);
        assert_eq!(ids(&past), vec!["a", "e"]);
    }

    #[test]
    fn test_urgent_partition_sorted_descending() {
        let announcements = vec![
            announcement("d1", true, "2025-01-01T00:00:00Z"),
            announcement("d2", false, "2025-01-15T00:00:00Z"),
            announcement("d3", true, "2025-02-01T00:00:00Z"),
        ];
        assert_eq!(ids(&derive(&announcements, &ViewSpec::urgent(true))), vec!["d3", "d1"]);
        assert_eq!(ids(&derive(&announcements, &ViewSpec::urgent(false))), vec!["d2"]);
    }

    #[test]
    fn test_flag_partition_is_exclusive() {
        let announcements = vec![
            announcement("a", true, "2025-01-01T00:00:00Z"),
            decode_record::<Announcement>(json!({ "_id": "b", "title": "no flag" })).unwrap(),
        ];
        let urgent = derive(&announcements, &ViewSpec::urgent(true));
        let regular = derive(&announcements, &ViewSpec::urgent(false));
        assert_eq!(urgent.len() + regular.len(), announcements.len());
        assert_eq!(ids(&regular), vec!["b"]);
    }

    #[test]
    fn test_missing_dates_sort_as_epoch() {
        let mut announcements = vec![
            decode_record::<Announcement>(json!({ "_id": "undated", "title": "x" })).unwrap(),
            announcement("new", false, "2025-01-15T00:00:00Z"),
            announcement("ancient", false, "1960-01-01T00:00:00Z"),
        ];
        sort_by_date(&mut announcements, SortDirection::Descending);
        assert_eq!(ids(&announcements), vec!["new", "undated", "ancient"]);

        sort_by_date(&mut announcements, SortDirection::Ascending);
        assert_eq!(ids(&announcements), vec!["ancient", "undated", "new"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let same = "2025-03-01T12:00:00Z";
        let mut events = vec![
            event("first", Some(same)),
            event("early", Some("2025-01-01T00:00:00Z")),
            event("second", Some(same)),
            event("third", Some(same)),
        ];
        sort_by_date(&mut events, SortDirection::Ascending);
        assert_eq!(ids(&events), vec!["early", "first", "second", "third"]);

        sort_by_date(&mut events, SortDirection::Descending);
        assert_eq!(ids(&events), vec!["first", "second", "third", "early"]);
    }

    #[test]
    fn test_text_filter_is_case_insensitive_over_search_fields() {
        let events: Vec<Event> = vec![
            decode_record(json!({ "_id": "1", "eventName": "Robot Wars", "organizingClubName": "Robotics" })).unwrap(),
            decode_record(json!({ "_id": "2", "eventName": "Poetry Slam", "description": "Bring a ROBOT poem" })).unwrap(),
            decode_record(json!({ "_id": "3", "eventName": "Open Mic" })).unwrap(),
        ];
        let filter = RecordFilter::new(Some("robot".to_string()), CategoryFilter::All);
        let matched = derive(&events, &ViewSpec::Filter(filter));
        assert_eq!(ids(&matched), vec!["1", "2"]);
    }

    #[test]
    fn test_text_filter_is_idempotent() {
        let clubs: Vec<Club> = vec![
            decode_record(json!({ "_id": "1", "clubName": "Chess Club", "shortDescription": "Blitz nights" })).unwrap(),
            decode_record(json!({ "_id": "2", "clubName": "Drama", "shortDescription": "Chessboard sets" })).unwrap(),
            decode_record(json!({ "_id": "3", "clubName": "Football" })).unwrap(),
        ];
        let view = ViewSpec::Filter(RecordFilter::new(Some("CHESS".to_string()), CategoryFilter::All));
        let once = derive(&clubs, &view);
        let twice = derive(&once, &view);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["1", "2"]);
    }

    #[test]
    fn test_empty_query_and_all_category_is_identity() {
        let clubs: Vec<Club> = vec![
            decode_record(json!({ "_id": "1", "clubName": "Chess Club", "category": "Academic" })).unwrap(),
            decode_record(json!({ "_id": "2", "clubName": "Drama" })).unwrap(),
            decode_record(json!({ "_id": "3", "clubName": "Football", "category": "Sports" })).unwrap(),
        ];
        let filter = RecordFilter::new(Some(String::new()), CategoryFilter::All);
        assert!(filter.is_identity());
        assert_eq!(derive(&clubs, &ViewSpec::Filter(filter)), clubs);
    }

    #[test]
    fn test_category_filter_exact_match() {
        let clubs: Vec<Club> = vec![
            decode_record(json!({ "_id": "1", "clubName": "Chess Club", "category": "Academic" })).unwrap(),
            decode_record(json!({ "_id": "2", "clubName": "Drama" })).unwrap(),
            decode_record(json!({ "_id": "3", "clubName": "Football", "category": "Sports" })).unwrap(),
        ];
        let filter = RecordFilter::new(None, CategoryFilter::Only(Category::Sports));
        assert_eq!(ids(&derive(&clubs, &ViewSpec::Filter(filter))), vec!["3"]);
    }

    #[test]
    fn test_filter_default_sort_follows_record_type() {
        let events = vec![
            event("late", Some("2025-05-01T00:00:00Z")),
            event("soon", Some("2025-02-02T00:00:00Z")),
        ];
        let all = ViewSpec::Filter(RecordFilter::default());
        assert_eq!(ids(&derive(&events, &all)), vec!["soon", "late"]);

        let announcements = vec![
            announcement("old", false, "2024-01-01T00:00:00Z"),
            announcement("new", false, "2025-01-01T00:00:00Z"),
        ];
        assert_eq!(ids(&derive(&announcements, &all)), vec!["new", "old"]);
    }

    #[test]
    fn test_derive_filtered_combines_partition_and_filter() {
        let events: Vec<Event> = vec![
            decode_record(json!({ "_id": "1", "eventName": "Hackathon", "category": "Tech", "eventDateTime": "2025-04-01T00:00:00Z" })).unwrap(),
            decode_record(json!({ "_id": "2", "eventName": "Hack Talk", "category": "Tech", "eventDateTime": "2025-03-01T00:00:00Z" })).unwrap(),
            decode_record(json!({ "_id": "3", "eventName": "Hack Retro", "category": "Tech", "eventDateTime": "2025-01-01T00:00:00Z" })).unwrap(),
            decode_record(json!({ "_id": "4", "eventName": "Hack Dance", "category": "Cultural", "eventDateTime": "2025-03-05T00:00:00Z" })).unwrap(),
        ];
        let filter = RecordFilter::new(Some("hack".to_string()), CategoryFilter::Only(Category::Tech));
        let upcoming = derive_filtered(&events, &ViewSpec::upcoming(feb_first()), &filter);
        assert_eq!(ids(&upcoming), vec!["2", "1"]);
    }

    #[test]
    fn test_derive_does_not_mutate_input() {
        let events = vec![
            event("b", Some("2025-05-01T00:00:00Z")),
            event("a", Some("2025-03-01T00:00:00Z")),
        ];
        let before = events.clone();
        let first = derive(&events, &ViewSpec::upcoming(feb_first()));
        let second = derive(&events, &ViewSpec::upcoming(feb_first()));
        assert_eq!(events, before);
        assert_eq!(first, second);
    }
}
