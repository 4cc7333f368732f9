use thiserror::Error;

pub type Result<T> = std::result::Result<T, FirecrawlError>;

#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// Network-level or body-decoding failure from reqwest.
    #[error("Firecrawl request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API. The numeric status is part of the
    /// display text; callers match on it to detect credential problems.
    #[error("Firecrawl API error ({status}): {message}")]
    Api { status: u16, message: String },
}
