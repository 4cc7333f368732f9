//! Directory records and per-target outcomes.
//!
//! `Startup` mirrors the Supabase row shape with employee and tag sub-records
//! embedded. Everything beyond `name` is optional so schema drift in the
//! directory never breaks a batch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartupEmployee {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartupTag {
    pub tag: String,
}

/// One directory record, immutable for the duration of a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Startup {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub funding_round: Option<String>,
    #[serde(default)]
    pub funding_amount: Option<String>,
    #[serde(default)]
    pub funding_date: Option<String>,
    #[serde(default)]
    pub team_size: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub startup_employees: Vec<StartupEmployee>,
    #[serde(default)]
    pub startup_tags: Vec<StartupTag>,
}

impl Startup {
    pub fn tag_names(&self) -> Vec<String> {
        self.startup_tags.iter().map(|t| t.tag.clone()).collect()
    }
}

/// The per-target result of one scrape attempt. Exactly one per target that
/// had a website; `error` is present exactly when content could not be
/// obtained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapeOutcome {
    pub name: String,
    pub website: String,
    pub content: String,
    pub employees: Vec<StartupEmployee>,
    pub tags: Vec<String>,
    pub sector: Option<String>,
    pub location: Option<String>,
    pub funding_round: Option<String>,
    pub funding_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeOutcome {
    pub fn from_startup(startup: &Startup, content: String, error: Option<String>) -> Self {
        Self {
            name: startup.name.clone(),
            website: startup.website.clone().unwrap_or_default(),
            content,
            employees: startup.startup_employees.clone(),
            tags: startup.tag_names(),
            sector: startup.sector.clone(),
            location: startup.location.clone(),
            funding_round: startup.funding_round.clone(),
            funding_amount: startup.funding_amount.clone(),
            error,
        }
    }
}
