use serde::{Deserialize, Serialize};

/// Body for `POST /v1/scrape`.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeRequest {
    pub url: String,
    pub formats: Vec<String>,
}

impl ScrapeRequest {
    /// The one request shape this pipeline uses: markdown only.
    pub fn markdown(url: &str) -> Self {
        Self {
            url: url.to_string(),
            formats: vec!["markdown".to_string()],
        }
    }
}

/// A 2xx response from `/v1/scrape`.
///
/// `success: false` with a populated `error` is how the service reports a
/// logical scrape failure (blocked page, unreachable site). That is data,
/// not a transport error.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<ScrapeDocument>,
    pub error: Option<String>,
}

/// Extracted page content.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeDocument {
    pub markdown: Option<String>,
    pub metadata: Option<DocumentMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
}

/// Error body shape the API uses on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}
