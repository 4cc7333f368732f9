//! Environment configuration.
//!
//! All fields are optional at load time. Validation happens per request via
//! [`AppConfig::credentials`], so a server started with an incomplete
//! `.env.local` still boots and reports the missing variables as a one-shot
//! JSON error instead of streaming. Tests construct `AppConfig` literals and
//! never touch process-wide state.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Missing env vars: {0} not set in .env.local")]
    MissingEnv(String),
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub firecrawl_api_key: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub port: u16,
}

/// The validated subset of [`AppConfig`] the scrape pipeline needs.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub firecrawl_api_key: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            firecrawl_api_key: read_env("FIRECRAWL_API_KEY"),
            supabase_url: read_env("SUPABASE_URL"),
            supabase_anon_key: read_env("SUPABASE_ANON_KEY"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// Validate that every external credential is present, naming all the
    /// missing variables in one message.
    pub fn credentials(&self) -> Result<Credentials, SetupError> {
        let mut missing = Vec::new();
        if self.firecrawl_api_key.is_none() {
            missing.push("FIRECRAWL_API_KEY");
        }
        if self.supabase_url.is_none() {
            missing.push("SUPABASE_URL");
        }
        if self.supabase_anon_key.is_none() {
            missing.push("SUPABASE_ANON_KEY");
        }
        if !missing.is_empty() {
            return Err(SetupError::MissingEnv(missing.join(", ")));
        }

        Ok(Credentials {
            firecrawl_api_key: self.firecrawl_api_key.clone().unwrap_or_default(),
            supabase_url: self.supabase_url.clone().unwrap_or_default(),
            supabase_anon_key: self.supabase_anon_key.clone().unwrap_or_default(),
        })
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
