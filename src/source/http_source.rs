use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::{
    domain::Collection,
    error::{AppError, Result},
    source::{PageOptions, RawPage, RecordSource, SourceFilter},
};

/// Reads a remote data service over its collections API:
/// `GET {base}/collections/{collection}/items?limit=&skip=&filter=` and
/// `GET {base}/collections/{collection}/items/{id}`.
#[derive(Clone)]
pub struct HttpRecordSource {
    http: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl fmt::Debug for HttpRecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRecordSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpRecordSource {
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Internal(format!("Invalid data source URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Internal(format!(
                "Data source URL {} cannot be a base",
                base_url
            )));
        }

        let http = Client::builder()
            .user_agent(concat!("campus-hub/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_token,
        })
    }

    pub fn endpoint(&self, collection: Collection, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["collections", collection.as_str(), "items"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_page(
        &self,
        collection: Collection,
        filter: &SourceFilter,
        options: PageOptions,
    ) -> Result<RawPage> {
        filter.validate()?;

        let mut request = self
            .get(self.endpoint(collection, None))
            .query(&[("limit", options.limit), ("skip", options.skip)]);
        if !filter.is_empty() {
            let encoded = serde_json::to_string(filter)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            request = request.query(&[("filter", encoded)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Retrieval(format!(
                "{} page request returned {}",
                collection.as_str(),
                status
            )));
        }

        let page: RawPage = response.json().await?;
        tracing::debug!(
            "Fetched {} {} records over HTTP (skip {}, has_next {})",
            page.items.len(),
            collection.as_str(),
            options.skip,
            page.has_next
        );
        Ok(page)
    }

    async fn fetch_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let response = self.get(self.endpoint(collection, Some(id))).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(AppError::Retrieval(format!(
                "{} lookup of {} returned {}",
                collection.as_str(),
                id,
                status
            ))),
        }
    }
}
