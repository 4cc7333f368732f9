// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The batch orchestration lives in scrape::orchestrator and consumes these.
//
// Naming convention: Base* for trait names (e.g., BaseWebScraper)

use async_trait::async_trait;
use thiserror::Error;

use crate::scrape::types::Startup;

// =============================================================================
// Web Scraper Trait (Infrastructure - one fetch per call)
// =============================================================================

/// A transport-level scrape failure: network error, non-2xx without a usable
/// body, auth rejection. The orchestrator classifies these by message text;
/// service-level failures never take this path.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ScrapeTransportError(pub String);

/// Normalized result of one scrape call that reached the service.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    /// Extracted markdown. Empty when the service reported non-success.
    pub markdown: String,
    /// The service's own success flag.
    pub ok: bool,
    /// The service's failure message when `ok` is false.
    pub error: Option<String>,
}

#[async_trait]
pub trait BaseWebScraper: Send + Sync {
    /// Fetch one URL through the content-extraction service.
    /// Exactly one network call, no internal retry.
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScrapeTransportError>;
}

// =============================================================================
// Startup Source Trait (Infrastructure - directory read)
// =============================================================================

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Missing env vars: SUPABASE_URL or SUPABASE_ANON_KEY not set in .env.local")]
    Unavailable,

    #[error("Supabase error ({status}): {detail}")]
    Query { status: u16, detail: String },

    #[error("Supabase request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait BaseStartupSource: Send + Sync {
    /// Read the current directory snapshot, with employee and tag sub-records
    /// attached in the same call. Pure read, single attempt.
    async fn fetch_startups(&self) -> Result<Vec<Startup>, SourceError>;
}
