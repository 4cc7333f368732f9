//! The batch scrape domain: wire types and the orchestrator.

pub mod events;
pub mod orchestrator;
pub mod types;

pub use events::ProgressEvent;
pub use orchestrator::{is_auth_failure, partition_targets, run_batch, EventSink};
pub use types::{ScrapeOutcome, Startup, StartupEmployee, StartupTag};
