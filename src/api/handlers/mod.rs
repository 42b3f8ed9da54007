pub mod root;
pub mod home;
pub mod clubs;
pub mod events;
pub mod announcements;
pub mod collections;

use crate::{
    domain::CategoryFilter,
    error::{AppError, Result},
    service::DirectoryQuery,
};

/// Build a directory query from raw query-string values.
pub(crate) fn directory_query(
    search: Option<String>,
    category: Option<&str>,
    pages: Option<u32>,
) -> Result<DirectoryQuery> {
    let category = match category {
        Some(value) => CategoryFilter::parse(value)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {}", value)))?,
        None => CategoryFilter::All,
    };

    Ok(DirectoryQuery {
        search,
        category,
        pages: pages.unwrap_or(1).max(1),
    })
}
