use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use validator::Validate;

use super::Category;
use crate::error::{AppError, Result};

/// Collections exposed by the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Events,
    Clubs,
    TeamMembers,
    Announcements,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Events,
        Collection::Clubs,
        Collection::TeamMembers,
        Collection::Announcements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Clubs => "clubs",
            Collection::TeamMembers => "teammembers",
            Collection::Announcements => "announcements",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Boolean fields a record set can be partitioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFlag {
    Urgent,
}

/// A validated, read-only record of one collection.
///
/// `Raw` is the loose wire shape; every field is optional there and
/// `from_raw` runs after `Raw::validate` has confirmed the required ones.
pub trait Record: Clone + Send + Sync + Serialize + 'static {
    type Raw: DeserializeOwned + Validate;

    const COLLECTION: Collection;

    /// Order used when a view does not dictate one.
    const DEFAULT_SORT: SortDirection;

    fn from_raw(raw: Self::Raw) -> Result<Self>;

    fn id(&self) -> &str;

    /// The date views sort and partition on.
    fn date(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    fn category(&self) -> Option<Category> {
        None
    }

    /// Absent flags read as `false`.
    fn flag(&self, _flag: RecordFlag) -> bool {
        false
    }
}

pub fn decode_record<R: Record>(value: Value) -> Result<R> {
    let raw: R::Raw = serde_json::from_value(value).map_err(|e| {
        AppError::Validation(format!("{} record: {}", R::COLLECTION.as_str(), e))
    })?;
    raw.validate().map_err(|e| {
        AppError::Validation(format!("{} record: {}", R::COLLECTION.as_str(), e))
    })?;
    R::from_raw(raw)
}

pub fn decode_records<R: Record>(values: Vec<Value>) -> Result<Vec<R>> {
    values.into_iter().map(decode_record::<R>).collect()
}

/// Unwrap a field `validate` has already confirmed is present.
pub(crate) fn required(value: Option<String>, collection: Collection, field: &str) -> Result<String> {
    value.ok_or_else(|| {
        AppError::Validation(format!("{} record missing {}", collection.as_str(), field))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::from_str("teammembers"), Some(Collection::TeamMembers));
        assert_eq!(Collection::from_str("members"), None);
        for collection in Collection::ALL {
            assert_eq!(Collection::from_str(collection.as_str()), Some(collection));
        }
    }
}
