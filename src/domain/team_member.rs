use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{record::required, Collection, Record, SortDirection};
use crate::error::Result;

/// A club leadership entry. The data carries no club reference, so members
/// are fetched globally.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamMember {
    pub id: String,
    pub full_name: String,
    pub role: Option<String>,
    pub section: Option<String>,
    pub photo: Option<String>,
    pub linked_in: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawTeamMember {
    #[serde(rename = "_id")]
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
    #[validate(required, length(min = 1))]
    pub full_name: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "teamSection")]
    pub section: Option<String>,
    pub photo: Option<String>,
    #[serde(rename = "linkedInProfile")]
    pub linked_in: Option<String>,
}

impl Record for TeamMember {
    type Raw = RawTeamMember;

    const COLLECTION: Collection = Collection::TeamMembers;
    const DEFAULT_SORT: SortDirection = SortDirection::Ascending;

    fn from_raw(raw: RawTeamMember) -> Result<Self> {
        Ok(TeamMember {
            id: required(raw.id, Self::COLLECTION, "_id")?,
            full_name: required(raw.full_name, Self::COLLECTION, "fullName")?,
            role: raw.role,
            section: raw.section,
            photo: raw.photo,
            linked_in: raw.linked_in,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str()];
        fields.extend(self.role.as_deref());
        fields
    }
}
