//! Mock implementations of the kernel traits for tests.
//!
//! Not behind `#[cfg(test)]` because the integration tests in `tests/`
//! consume them through the library crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::traits::{
    BaseStartupSource, BaseWebScraper, ScrapeResult, ScrapeTransportError, SourceError,
};
use crate::scrape::types::Startup;

/// One scripted response for [`MockWebScraper`].
#[derive(Debug, Clone)]
pub enum ScriptedScrape {
    /// 2xx with `success: true` and this markdown.
    Success(String),
    /// 2xx with `success: false` and this service message.
    ServiceFailure(String),
    /// Raised transport error with this message.
    TransportFailure(String),
}

/// Web scraper that replays a scripted queue of responses, one per call.
/// When the script runs dry, every further call succeeds with the default
/// content, so callers only script the interesting prefix.
pub struct MockWebScraper {
    script: Mutex<VecDeque<ScriptedScrape>>,
    default_markdown: String,
}

impl MockWebScraper {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_markdown: "# Mock page".to_string(),
        }
    }

    pub fn with_response(markdown: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_markdown: markdown.to_string(),
        }
    }

    pub fn then(self, step: ScriptedScrape) -> Self {
        self.script
            .lock()
            .expect("mock scraper script lock")
            .push_back(step);
        self
    }
}

impl Default for MockWebScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWebScraper for MockWebScraper {
    async fn scrape(&self, _url: &str) -> Result<ScrapeResult, ScrapeTransportError> {
        let step = self
            .script
            .lock()
            .expect("mock scraper script lock")
            .pop_front();

        match step {
            None => Ok(ScrapeResult {
                markdown: self.default_markdown.clone(),
                ok: true,
                error: None,
            }),
            Some(ScriptedScrape::Success(markdown)) => Ok(ScrapeResult {
                markdown,
                ok: true,
                error: None,
            }),
            Some(ScriptedScrape::ServiceFailure(message)) => Ok(ScrapeResult {
                markdown: String::new(),
                ok: false,
                error: Some(message),
            }),
            Some(ScriptedScrape::TransportFailure(message)) => {
                Err(ScrapeTransportError(message))
            }
        }
    }
}

/// Startup source returning a fixed snapshot, or a scripted query failure.
pub struct MockStartupSource {
    startups: Vec<Startup>,
    failure: Option<(u16, String)>,
}

impl MockStartupSource {
    pub fn with_startups(startups: Vec<Startup>) -> Self {
        Self {
            startups,
            failure: None,
        }
    }

    pub fn failing(status: u16, detail: &str) -> Self {
        Self {
            startups: Vec::new(),
            failure: Some((status, detail.to_string())),
        }
    }
}

#[async_trait]
impl BaseStartupSource for MockStartupSource {
    async fn fetch_startups(&self) -> Result<Vec<Startup>, SourceError> {
        match &self.failure {
            Some((status, detail)) => Err(SourceError::Query {
                status: *status,
                detail: detail.clone(),
            }),
            None => Ok(self.startups.clone()),
        }
    }
}
