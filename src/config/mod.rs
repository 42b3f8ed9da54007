use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};
use validator::Validate;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub data_source: DataSourceConfig,
    #[serde(default)]
    pub pages: PageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Sqlite,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSourceConfig {
    pub kind: DataSourceKind,
    pub database_url: String,
    pub max_connections: u32,
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

/// Page sizes and the knobs that shape what each page's aggregators fetch.
///
/// A zero size would make every source report a page that never advances,
/// so sizes and limits must be at least 1.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct PageConfig {
    #[validate(range(min = 1))]
    pub events_page_size: u64,
    #[validate(range(min = 1))]
    pub clubs_page_size: u64,
    #[validate(range(min = 1))]
    pub announcements_page_size: u64,
    #[validate(range(min = 1))]
    pub home_events_limit: u64,
    #[validate(range(min = 1))]
    pub home_clubs_limit: u64,
    #[validate(range(min = 1))]
    pub home_announcements_limit: u64,
    /// Page size for the club profile and event detail lookups, which only
    /// ever read the first page of the related collection.
    #[validate(range(min = 1))]
    pub profile_fetch_limit: u64,
    /// Upper bound on `pages` a single request may replay.
    #[validate(range(min = 1))]
    pub max_pages: u32,
    /// When false, "load more" is unavailable while a search or category
    /// filter is active. Filters only see records already paged in.
    pub load_more_while_filtered: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            events_page_size: 50,
            clubs_page_size: 50,
            announcements_page_size: 20,
            home_events_limit: 6,
            home_clubs_limit: 6,
            home_announcements_limit: 3,
            profile_fetch_limit: 50,
            max_pages: 10,
            load_more_while_filtered: false,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("data_source.kind", "sqlite")?
            .set_default("data_source.database_url", "sqlite://campus_hub.db?mode=rwc")?
            .set_default("data_source.max_connections", 10)?
            .set_default("data_source.timeout_secs", 15)?
            .set_default("pages.events_page_size", 50)?
            .set_default("pages.clubs_page_size", 50)?
            .set_default("pages.announcements_page_size", 20)?
            .set_default("pages.home_events_limit", 6)?
            .set_default("pages.home_clubs_limit", 6)?
            .set_default("pages.home_announcements_limit", 3)?
            .set_default("pages.profile_fetch_limit", 50)?
            .set_default("pages.max_pages", 10)?
            .set_default("pages.load_more_while_filtered", false)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with CAMPUS_HUB__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("CAMPUS_HUB").separator("__"))

            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings
            .pages
            .validate()
            .map_err(|e| ConfigError::Message(format!("Invalid page settings: {}", e)))?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            data_source: DataSourceConfig {
                kind: DataSourceKind::Sqlite,
                database_url: "sqlite://campus_hub.db?mode=rwc".to_string(),
                max_connections: 10,
                base_url: None,
                api_token: None,
                timeout_secs: 15,
            },
            pages: PageConfig::default(),
        }
    }
}
