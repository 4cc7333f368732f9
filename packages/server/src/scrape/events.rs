//! Progress stream wire unit.
//!
//! Serialized as one `data: <JSON>\n\n` frame per event. The tag and field
//! names are the wire contract with the consumer; `contentLength` stays
//! camelCase.

use serde::{Deserialize, Serialize};

use super::types::ScrapeOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// First frame of every stream: batch size after website filtering.
    Init { total: usize, skipped: usize },

    /// One frame per processed target, index running 1..=total.
    Progress {
        index: usize,
        total: usize,
        name: String,
        success: bool,
        #[serde(
            rename = "contentLength",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        content_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// Terminal abort frame; no `done` follows.
    Error { message: String },

    /// Terminal success frame carrying every accumulated outcome in order.
    Done { results: Vec<ScrapeOutcome> },
}
