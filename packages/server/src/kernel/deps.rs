//! Server dependencies for request handlers (using traits for testability)

use std::sync::Arc;

use super::config::Credentials;
use super::firecrawl::FirecrawlScraper;
use super::supabase::SupabaseStartupSource;
use super::traits::{BaseStartupSource, BaseWebScraper};

/// External collaborators of one scrape run. Built per request from validated
/// credentials; tests inject mock implementations instead.
pub struct ServerDeps {
    pub scraper: Arc<dyn BaseWebScraper>,
    pub startup_source: Arc<dyn BaseStartupSource>,
}

impl ServerDeps {
    pub fn from_credentials(creds: &Credentials) -> Self {
        Self {
            scraper: Arc::new(FirecrawlScraper::new(creds.firecrawl_api_key.clone())),
            startup_source: Arc::new(SupabaseStartupSource::new(
                creds.supabase_url.clone(),
                creds.supabase_anon_key.clone(),
            )),
        }
    }

    pub fn new(
        scraper: Arc<dyn BaseWebScraper>,
        startup_source: Arc<dyn BaseStartupSource>,
    ) -> Self {
        Self {
            scraper,
            startup_source,
        }
    }
}
