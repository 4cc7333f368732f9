//! Batch orchestration.
//!
//! Drives one scrape batch end to end: emit `init`, scrape each target
//! strictly sequentially with per-target error isolation, then emit one
//! terminal `error` (auth abort) or `done` (full result set). Everything the
//! client sees flows through the [`EventSink`]; the batch has no other
//! output and no persistence.

use tokio::sync::mpsc;

use super::events::ProgressEvent;
use super::types::{ScrapeOutcome, Startup};
use crate::kernel::traits::BaseWebScraper;

/// Substrings that mark a transport failure as a credential problem.
///
/// Known fragility: this matches display text from an external service,
/// which is not a stable contract. Kept deliberately small and only ever
/// applied to the first target of a batch.
pub const AUTH_FAILURE_MARKERS: &[&str] = &["401", "Unauthorized", "Invalid API", "Unexpected error"];

/// Case-sensitive credential-failure check for a transport error message.
pub fn is_auth_failure(message: &str) -> bool {
    AUTH_FAILURE_MARKERS.iter().any(|m| message.contains(m))
}

/// Split a directory snapshot into scrape targets and a skipped count.
/// Targets without a website are excluded entirely, not represented as
/// outcomes.
pub fn partition_targets(startups: Vec<Startup>) -> (Vec<Startup>, usize) {
    let total = startups.len();
    let with_website: Vec<Startup> = startups
        .into_iter()
        .filter(|s| s.website.as_deref().is_some_and(|w| !w.is_empty()))
        .collect();
    let skipped = total - with_website.len();
    (with_website, skipped)
}

/// Ordered, flush-per-event outbound channel to the client.
///
/// `send` resolves only after the event is accepted by the transport queue,
/// so frame order is exactly emission order. Returns `false` when the
/// receiver is gone (client disconnected); the batch stops quietly then.
pub struct EventSink {
    tx: mpsc::Sender<ProgressEvent>,
}

impl EventSink {
    pub fn new(tx: mpsc::Sender<ProgressEvent>) -> Self {
        Self { tx }
    }

    pub async fn send(&self, event: ProgressEvent) -> bool {
        if self.tx.send(event).await.is_err() {
            tracing::debug!("Progress receiver dropped, stopping batch");
            return false;
        }
        true
    }
}

/// Run one batch over targets that already passed the website filter.
///
/// State machine: Init -> Streaming -> Done | Aborted. The only abort is a
/// first-target transport failure matching [`is_auth_failure`]; every other
/// failure is folded into that target's outcome and the loop continues.
pub async fn run_batch(
    scraper: &dyn BaseWebScraper,
    targets: Vec<Startup>,
    skipped: usize,
    sink: &EventSink,
) {
    let total = targets.len();
    tracing::info!(total, skipped, "Starting scrape batch");

    if !sink.send(ProgressEvent::Init { total, skipped }).await {
        return;
    }

    let mut results: Vec<ScrapeOutcome> = Vec::with_capacity(total);

    for (i, startup) in targets.iter().enumerate() {
        let website = startup.website.as_deref().unwrap_or_default();

        match scraper.scrape(website).await {
            Ok(page) => {
                let content_length = page.markdown.chars().count();
                let success = page.ok && content_length > 0;
                tracing::info!(
                    name = %startup.name,
                    index = i + 1,
                    total,
                    success,
                    content_length,
                    "Scraped target"
                );

                results.push(ScrapeOutcome::from_startup(
                    startup,
                    page.markdown,
                    page.error.clone(),
                ));

                let sent = sink
                    .send(ProgressEvent::Progress {
                        index: i + 1,
                        total,
                        name: startup.name.clone(),
                        success,
                        content_length: Some(content_length),
                        error: page.error,
                    })
                    .await;
                if !sent {
                    return;
                }
            }
            Err(err) => {
                let message = err.to_string();

                // A first-call auth failure means the whole batch is
                // misconfigured; abort before burning N-1 more doomed calls.
                // After one call has gone through, credentials are assumed
                // valid for the rest of the run.
                if i == 0 && is_auth_failure(&message) {
                    tracing::warn!(error = %message, "First scrape failed auth check, aborting batch");
                    sink.send(ProgressEvent::Error {
                        message: format!(
                            "Firecrawl API key error: {message}. Check FIRECRAWL_API_KEY in .env.local"
                        ),
                    })
                    .await;
                    return;
                }

                tracing::warn!(name = %startup.name, index = i + 1, error = %message, "Scrape failed");

                results.push(ScrapeOutcome::from_startup(
                    startup,
                    String::new(),
                    Some(message.clone()),
                ));

                let sent = sink
                    .send(ProgressEvent::Progress {
                        index: i + 1,
                        total,
                        name: startup.name.clone(),
                        success: false,
                        content_length: None,
                        error: Some(message),
                    })
                    .await;
                if !sent {
                    return;
                }
            }
        }
    }

    tracing::info!(results = results.len(), "Scrape batch complete");
    sink.send(ProgressEvent::Done { results }).await;
}
