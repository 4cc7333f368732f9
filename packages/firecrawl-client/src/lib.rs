//! Pure Firecrawl REST API client.
//!
//! A minimal client for the Firecrawl v1 scrape endpoint. One network call
//! per `scrape_url` invocation, no retries, no polling.
//!
//! # Example
//!
//! ```rust,ignore
//! use firecrawl_client::FirecrawlClient;
//!
//! let client = FirecrawlClient::new("fc-your-api-key".into());
//!
//! let resp = client.scrape_url("https://example.com").await?;
//! if resp.success {
//!     let markdown = resp.data.and_then(|d| d.markdown).unwrap_or_default();
//!     println!("{markdown}");
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{DocumentMetadata, ScrapeDocument, ScrapeRequest, ScrapeResponse};

use types::ApiErrorBody;

const BASE_URL: &str = "https://api.firecrawl.dev/v1";

pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Scrape one URL as markdown. Exactly one HTTP call.
    ///
    /// A 2xx response is returned as-is, including `success: false` bodies
    /// where the service itself reports a failed scrape. Non-2xx responses
    /// become [`FirecrawlError::Api`] with the body's error text when the
    /// body parses, else the raw body or status text.
    pub async fn scrape_url(&self, url: &str) -> Result<ScrapeResponse> {
        tracing::debug!(url, "Scraping via Firecrawl");

        let resp = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ScrapeRequest::markdown(url))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("").to_string();
            let body = resp.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed
                    .error
                    .or(parsed.message)
                    .unwrap_or_else(|| if body.is_empty() { reason } else { body }),
                Err(_) => {
                    if body.is_empty() {
                        reason
                    } else {
                        body
                    }
                }
            };
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ScrapeResponse = resp.json().await?;
        if !parsed.success {
            tracing::debug!(url, error = ?parsed.error, "Firecrawl reported scrape failure");
        }
        Ok(parsed)
    }
}
