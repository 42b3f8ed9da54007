use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{record::required, Category, Collection, Record, SortDirection};
use crate::error::Result;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date_time: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub category: Option<Category>,
    /// Joined against `Club::name`, not an id.
    pub organizing_club_name: Option<String>,
    pub description: Option<String>,
    pub poster_image: Option<String>,
    pub registration_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(rename = "_id")]
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
    #[serde(rename = "eventName")]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde(rename = "eventDateTime")]
    pub date_time: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub category: Option<String>,
    pub organizing_club_name: Option<String>,
    pub description: Option<String>,
    pub poster_image: Option<String>,
    pub registration_link: Option<String>,
}

impl Event {
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date_time.map(|d| d < now).unwrap_or(false)
    }
}

impl Record for Event {
    type Raw = RawEvent;

    const COLLECTION: Collection = Collection::Events;
    const DEFAULT_SORT: SortDirection = SortDirection::Ascending;

    fn from_raw(raw: RawEvent) -> Result<Self> {
        let id = required(raw.id, Self::COLLECTION, "_id")?;
        let category = Category::from_wire(raw.category.as_deref(), Self::COLLECTION, &id);
        Ok(Event {
            name: required(raw.name, Self::COLLECTION, "eventName")?,
            id,
            date_time: raw.date_time,
            venue: raw.venue,
            category,
            organizing_club_name: raw.organizing_club_name,
            description: raw.description,
            poster_image: raw.poster_image,
            registration_link: raw.registration_link,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.date_time
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.organizing_club_name.as_deref());
        fields
    }

    fn category(&self) -> Option<Category> {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decode_record;
    use crate::error::AppError;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_decode_full_event() {
        let event: Event = decode_record(json!({
            "_id": "e1",
            "eventName": "Hack Night",
            "eventDateTime": "2025-03-01T18:00:00Z",
            "venue": "Lab 4",
            "category": "Tech",
            "organizingClubName": "Robotics",
            "registrationLink": "https://example.com/r",
            "_createdDate": "2024-12-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(event.name, "Hack Night");
        assert_eq!(event.category, Some(Category::Tech));
        assert_eq!(
            event.date_time,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap())
        );
        assert_eq!(event.search_fields(), vec!["Hack Night", "Robotics"]);
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let result = decode_record::<Event>(json!({ "_id": "e1" }));
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = decode_record::<Event>(json!({ "_id": "e1", "eventName": "" }));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_date_fails_validation() {
        let result = decode_record::<Event>(json!({
            "_id": "e1",
            "eventName": "x",
            "eventDateTime": "next tuesday"
        }));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_is_past() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let mut event: Event = decode_record(json!({ "_id": "e1", "eventName": "x" })).unwrap();
        assert!(!event.is_past(now));
        event.date_time = Some(now);
        assert!(!event.is_past(now));
        event.date_time = Some(Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap());
        assert!(event.is_past(now));
    }
}
