//! Firecrawl implementation of BaseWebScraper.

use async_trait::async_trait;
use firecrawl_client::FirecrawlClient;

use super::traits::{BaseWebScraper, ScrapeResult, ScrapeTransportError};

pub struct FirecrawlScraper {
    client: FirecrawlClient,
}

impl FirecrawlScraper {
    pub fn new(api_key: String) -> Self {
        Self {
            client: FirecrawlClient::new(api_key),
        }
    }
}

#[async_trait]
impl BaseWebScraper for FirecrawlScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScrapeTransportError> {
        let resp = self
            .client
            .scrape_url(url)
            .await
            .map_err(|e| ScrapeTransportError(e.to_string()))?;

        if resp.success {
            Ok(ScrapeResult {
                markdown: resp.data.and_then(|d| d.markdown).unwrap_or_default(),
                ok: true,
                error: None,
            })
        } else {
            // A reported failure is data for the outcome, not an error.
            Ok(ScrapeResult {
                markdown: String::new(),
                ok: false,
                error: Some(
                    resp.error
                        .unwrap_or_else(|| "Scrape failed without error detail".to_string()),
                ),
            })
        }
    }
}
