//! Startup directory scrape service.
//!
//! Batch-scrapes every startup website in the directory through the
//! Firecrawl API and streams per-target progress to the client as SSE
//! frames. One batch lives for exactly one HTTP request; there is no job
//! store and no resume.

pub mod kernel;
pub mod scrape;
pub mod server;
