//! Supabase REST adapter for the startup directory.
//!
//! One GET against the `startups` table with employee and tag sub-records
//! embedded, newest first. This is the only query the scrape pipeline makes
//! against the data store.

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use super::traits::{BaseStartupSource, SourceError};
use crate::scrape::types::Startup;

pub struct SupabaseStartupSource {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStartupSource {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            anon_key,
        }
    }
}

#[async_trait]
impl BaseStartupSource for SupabaseStartupSource {
    async fn fetch_startups(&self) -> Result<Vec<Startup>, SourceError> {
        if self.base_url.is_empty() || self.anon_key.is_empty() {
            return Err(SourceError::Unavailable);
        }

        let resp = self
            .client
            .get(format!("{}/rest/v1/startups", self.base_url))
            .query(&[
                ("select", "*,startup_employees(*),startup_tags(tag)"),
                ("order", "created_at.desc"),
            ])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Accept-Profile", "public")
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed");
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Query {
                status: status.as_u16(),
                detail: error_detail(&body, fallback),
            });
        }

        let startups: Vec<Startup> = resp.json().await?;
        tracing::debug!(count = startups.len(), "Fetched startups from Supabase");
        Ok(startups)
    }
}

/// Pull a human-readable detail out of a PostgREST error body: the JSON
/// `message` or `error` field when the body parses, else the raw body, else
/// the HTTP status text.
fn error_detail(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = parsed
            .get("message")
            .or_else(|| parsed.get("error"))
            .and_then(|v| v.as_str())
        {
            return msg.to_string();
        }
    }
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}
