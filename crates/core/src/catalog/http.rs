//! HTTP catalog client.
//!
//! Downloads the catalog with a single GET and decodes either the Gutendex
//! envelope (`{"results": [...]}`) or a bare JSON array of books.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::{decode_catalog, Book, CatalogFetcher, FetchError};
use crate::config::CatalogSourceConfig;

/// Catalog fetcher backed by a reqwest client.
pub struct HttpCatalogFetcher {
    client: Client,
    endpoint: String,
}

impl HttpCatalogFetcher {
    /// Create a new fetcher for the configured endpoint.
    ///
    /// The endpoint itself is parsed on every fetch so that a malformed URL
    /// surfaces as [`FetchError::InvalidEndpoint`] at refresh time.
    pub fn new(config: &CatalogSourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Unclassified(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.url.clone(),
        })
    }

    /// The configured endpoint, as given.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse_endpoint(&self) -> Result<Url, FetchError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FetchError::InvalidEndpoint(format!(
                "unsupported scheme '{}' in {}",
                other, self.endpoint
            ))),
        }
    }
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch(&self) -> Result<Vec<Book>, FetchError> {
        let url = self.parse_endpoint()?;

        debug!(url = %url, "Fetching book catalog");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::InvalidResponse {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let body = response.text().await?;
        let books = decode_catalog(&body)?;

        debug!(count = books.len(), "Decoded book catalog");

        Ok(books)
    }
}
