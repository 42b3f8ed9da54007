use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{record::required, Category, Collection, Record, SortDirection};
use crate::error::Result;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub category: Option<Category>,
    pub short_description: Option<String>,
    pub about: Option<String>,
    pub logo: Option<String>,
    pub banner_image: Option<String>,
    pub contact: ContactInfo,
    pub social: SocialLinks,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub linked_in: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawClub {
    #[serde(rename = "_id")]
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
    #[serde(rename = "clubName")]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub short_description: Option<String>,
    #[serde(rename = "aboutSection")]
    pub about: Option<String>,
    #[serde(rename = "clubLogo")]
    pub logo: Option<String>,
    pub banner_image: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub instagram_link: Option<String>,
    #[serde(rename = "linkedInLink")]
    pub linked_in_link: Option<String>,
}

impl Record for Club {
    type Raw = RawClub;

    const COLLECTION: Collection = Collection::Clubs;
    const DEFAULT_SORT: SortDirection = SortDirection::Ascending;

    fn from_raw(raw: RawClub) -> Result<Self> {
        let id = required(raw.id, Self::COLLECTION, "_id")?;
        let category = Category::from_wire(raw.category.as_deref(), Self::COLLECTION, &id);
        Ok(Club {
            name: required(raw.name, Self::COLLECTION, "clubName")?,
            id,
            category,
            short_description: raw.short_description,
            about: raw.about,
            logo: raw.logo,
            banner_image: raw.banner_image,
            contact: ContactInfo {
                email: raw.contact_email,
                phone: raw.contact_phone,
            },
            social: SocialLinks {
                instagram: raw.instagram_link,
                linked_in: raw.linked_in_link,
            },
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.short_description.as_deref());
        fields
    }

    fn category(&self) -> Option<Category> {
        self.category
    }
}
