//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::{AppConfig, ServerDeps};
use crate::server::routes::{health_handler, scrape_handler};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub config: Arc<AppConfig>,
    /// Test override. When set, request handlers use these collaborators
    /// instead of building real ones from the config.
    pub deps_override: Option<Arc<ServerDeps>>,
}

impl AxumAppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            deps_override: None,
        }
    }

    pub fn with_deps(config: Arc<AppConfig>, deps: Arc<ServerDeps>) -> Self {
        Self {
            config,
            deps_override: Some(deps),
        }
    }
}

/// Build the Axum application router.
///
/// CORS is permissive: the directory UI runs on a separate origin and the
/// API carries no credentials.
pub fn build_app(state: AxumAppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/scrape", post(scrape_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
