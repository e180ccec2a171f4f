//! Page fetcher implementations
//!
//! A fetcher performs exactly one request per call and folds every outcome
//! into a [`PageResult`]. It never retries.

use super::types::{PageRequest, PageResult, ReviewEnvelope};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::ItemId;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Query parameter carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Headers sent with every review request
pub const REVIEW_HEADERS: [(&str, &str); 3] = [
    ("accept", "application/json, text/plain, */*"),
    ("x-web-client", "desktop"),
    ("x-web-optimize-response", "1"),
];

/// Source of review pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page and classify the outcome
    async fn fetch(&self, request: &PageRequest) -> PageResult;
}

/// Fetches review pages for one item over HTTP
#[derive(Debug)]
pub struct ReviewPageFetcher {
    client: HttpClient,
    endpoint: Url,
}

impl ReviewPageFetcher {
    /// Create a fetcher for `item` under `base_url`.
    ///
    /// The item endpoint is `{base_url}/{item}/`.
    pub fn new(client: HttpClient, base_url: &str, item: &ItemId) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: item_endpoint(base_url, item)?,
        })
    }

    /// The per-item resource all pages are requested from
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PageFetcher for ReviewPageFetcher {
    async fn fetch(&self, request: &PageRequest) -> PageResult {
        let config = RequestConfig::new().query(PAGE_PARAM, request.page_index.to_string());

        debug!(
            page = request.page_index,
            retry = request.retry_count,
            "GET {}",
            self.endpoint
        );

        match self.client.get_text(self.endpoint.as_str(), config).await {
            Ok(body) => classify_page(&body),
            Err(e) if e.is_transport() => PageResult::TransportFailure(e),
            Err(e) => PageResult::TransportFailure(Error::Other(e.to_string())),
        }
    }
}

/// Build the per-item endpoint from the base URL
pub fn item_endpoint(base_url: &str, item: &ItemId) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if base.cannot_be_a_base() {
        return Err(Error::invalid_value(
            "api.base_url",
            format!("'{base_url}' cannot be used as a base URL"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(&format!("{item}/"))?)
}

/// Classify a 2xx response body
pub fn classify_page(body: &str) -> PageResult {
    let envelope: ReviewEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => return PageResult::Malformed(e.to_string()),
    };

    let Some(data) = envelope.data else {
        return PageResult::Empty;
    };

    match data.comments {
        Some(items) if !items.is_empty() => PageResult::Records {
            items,
            declared_total_pages: data
                .pager
                .and_then(|p| p.total_pages)
                .filter(|&total| total > 0),
        },
        _ => PageResult::Empty,
    }
}
