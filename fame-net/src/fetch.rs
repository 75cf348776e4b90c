//! Page fetching
//!
//! [`PageFetcher`] is the seam between the scrapers and the network. The
//! collector and the fact retriever only ever see status codes and bodies, so
//! tests can hand them canned pages.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{create_client, HttpConfig, NetError};

/// A fetched page: status code and body text
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can GET a URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page. Non-success statuses are returned, not raised.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, NetError>;
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, NetError> {
        Ok(Self {
            client: create_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, NetError> {
        debug!("Fetching: {}", url);
        let target = Url::parse(url).map_err(|e| NetError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self
            .client
            .get(target)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("{} answered {} ({} bytes)", url, status, body.len());
        Ok(FetchedPage { status, body })
    }
}
