use serde::{Deserialize, Serialize};

use super::Collection;

/// Fixed set of categories shared by clubs and events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Tech,
    Cultural,
    Sports,
    Literary,
    Social,
    Academic,
    Workshop,
}

pub const ALL_SENTINEL: &str = "All";

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Tech,
        Category::Cultural,
        Category::Sports,
        Category::Literary,
        Category::Social,
        Category::Academic,
        Category::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "Tech",
            Category::Cultural => "Cultural",
            Category::Sports => "Sports",
            Category::Literary => "Literary",
            Category::Social => "Social",
            Category::Academic => "Academic",
            Category::Workshop => "Workshop",
        }
    }

    /// Exact, case-sensitive match against the stored category value.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Decode the optional category of a fetched record. Unknown values are
    /// not a validation failure since the field is optional.
    pub(crate) fn from_wire(value: Option<&str>, collection: Collection, id: &str) -> Option<Self> {
        let value = value.filter(|v| !v.is_empty())?;
        let category = Self::from_str(value);
        if category.is_none() {
            tracing::warn!(
                "Unknown category {:?} on {} record {}; treating as uncategorized",
                value,
                collection.as_str(),
                id
            );
        }
        category
    }
}

/// Category selection as entered by the user; `All` is the identity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || s == ALL_SENTINEL {
            return Some(CategoryFilter::All);
        }
        Category::from_str(s).map(CategoryFilter::Only)
    }

    pub fn matches(&self, category: Option<Category>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(*wanted),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}
