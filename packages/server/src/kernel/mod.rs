//! Infrastructure: configuration, DI traits, external-service adapters.

pub mod config;
pub mod deps;
pub mod firecrawl;
pub mod supabase;
pub mod test_dependencies;
pub mod traits;

pub use config::{AppConfig, Credentials, SetupError};
pub use deps::ServerDeps;
pub use firecrawl::FirecrawlScraper;
pub use supabase::SupabaseStartupSource;
pub use traits::{
    BaseStartupSource, BaseWebScraper, ScrapeResult, ScrapeTransportError, SourceError,
};
