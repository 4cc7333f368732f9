//! Client-side run state, mutated only by incoming events or local
//! cancellation, reset when a new run starts.

use server_core::scrape::types::ScrapeOutcome;
use server_core::scrape::ProgressEvent;

/// One line of the scrolling per-target log.
#[derive(Debug, Clone)]
pub struct ScrapeLog {
    pub name: String,
    pub success: bool,
    pub content_length: Option<usize>,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct BatchRunState {
    pub current: usize,
    pub total: usize,
    pub skipped: usize,
    pub logs: Vec<ScrapeLog>,
    pub results: Option<Vec<ScrapeOutcome>>,
    pub fatal_error: Option<String>,
    pub is_running: bool,
}

impl BatchRunState {
    pub fn new() -> Self {
        Self {
            is_running: true,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Init { total, skipped } => {
                self.current = 0;
                self.total = total;
                self.skipped = skipped;
            }
            ProgressEvent::Progress {
                index,
                name,
                success,
                content_length,
                error,
                ..
            } => {
                self.current = index;
                self.logs.push(ScrapeLog {
                    name,
                    success,
                    content_length,
                    error,
                });
            }
            ProgressEvent::Error { message } => {
                self.fatal_error = Some(message);
            }
            ProgressEvent::Done { results } => {
                self.results = Some(results);
                self.is_running = false;
            }
        }
    }

    /// Cooperative cancellation: not an error, fatal_error stays empty.
    pub fn cancel(&mut self) {
        self.is_running = false;
    }

    pub fn success_count(&self) -> usize {
        self.logs.iter().filter(|l| l.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.logs.iter().filter(|l| !l.success).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_walks_through_a_full_run() {
        let mut state = BatchRunState::new();
        assert!(state.is_running);

        state.apply(ProgressEvent::Init { total: 2, skipped: 1 });
        assert_eq!((state.total, state.skipped, state.current), (2, 1, 0));

        state.apply(ProgressEvent::Progress {
            index: 1,
            total: 2,
            name: "Acme".to_string(),
            success: true,
            content_length: Some(1500),
            error: None,
        });
        state.apply(ProgressEvent::Progress {
            index: 2,
            total: 2,
            name: "Beta".to_string(),
            success: false,
            content_length: None,
            error: Some("timeout".to_string()),
        });
        assert_eq!(state.current, 2);
        assert_eq!(state.success_count(), 1);
        assert_eq!(state.failure_count(), 1);

        state.apply(ProgressEvent::Done { results: Vec::new() });
        assert!(!state.is_running);
        assert!(state.results.is_some());
        assert!(state.fatal_error.is_none());
    }

    #[test]
    fn terminal_error_populates_fatal_error() {
        let mut state = BatchRunState::new();
        state.apply(ProgressEvent::Init { total: 3, skipped: 0 });
        state.apply(ProgressEvent::Error {
            message: "Firecrawl API key error".to_string(),
        });
        assert_eq!(state.fatal_error.as_deref(), Some("Firecrawl API key error"));
        assert!(state.results.is_none());
    }

    #[test]
    fn cancel_is_not_an_error() {
        let mut state = BatchRunState::new();
        state.apply(ProgressEvent::Init { total: 3, skipped: 0 });
        state.cancel();
        assert!(!state.is_running);
        assert!(state.fatal_error.is_none());
    }
}
