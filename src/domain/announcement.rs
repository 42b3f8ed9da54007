use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{record::required, Collection, Record, RecordFlag, SortDirection};
use crate::error::Result;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub is_urgent: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawAnnouncement {
    #[serde(rename = "_id")]
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub is_urgent: Option<bool>,
}

impl Record for Announcement {
    type Raw = RawAnnouncement;

    const COLLECTION: Collection = Collection::Announcements;
    const DEFAULT_SORT: SortDirection = SortDirection::Descending;

    fn from_raw(raw: RawAnnouncement) -> Result<Self> {
        Ok(Announcement {
            id: required(raw.id, Self::COLLECTION, "_id")?,
            title: required(raw.title, Self::COLLECTION, "title")?,
            content: raw.content,
            publish_date: raw.publish_date,
            author: raw.author,
            is_urgent: raw.is_urgent.unwrap_or(false),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.publish_date
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.content.as_deref());
        fields
    }

    fn flag(&self, flag: RecordFlag) -> bool {
        match flag {
            RecordFlag::Urgent => self.is_urgent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decode_record;
    use serde_json::json;

    #[test]
    fn test_absent_urgent_flag_reads_false() {
        let announcement: Announcement = decode_record(json!({
            "_id": "a1",
            "title": "Library hours",
            "publishDate": null
        }))
        .unwrap();
        assert!(!announcement.flag(RecordFlag::Urgent));
        assert_eq!(announcement.date(), None);
    }

    #[test]
    fn test_urgent_flag() {
        let announcement: Announcement = decode_record(json!({
            "_id": "a2",
            "title": "Campus closed",
            "isUrgent": true,
            "publishDate": "2025-01-05T09:00:00Z"
        }))
        .unwrap();
        assert!(announcement.flag(RecordFlag::Urgent));
    }
}
