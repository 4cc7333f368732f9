// Main entry point for the scrape API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::kernel::AppConfig;
use server_core::server::{build_app, AxumAppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting startup directory scrape server");

    let config = AppConfig::from_env();
    if let Err(err) = config.credentials() {
        // Boot anyway: the scrape route reports this per request, matching
        // the one-shot JSON error contract.
        tracing::warn!(error = %err, "Incomplete configuration, /api/scrape will return setup errors");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_app(AxumAppState::new(Arc::new(config)));

    tracing::info!("Listening on {}", addr);
    tracing::info!("Scrape endpoint: POST http://localhost{}/api/scrape", addr.trim_start_matches("0.0.0.0"));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
