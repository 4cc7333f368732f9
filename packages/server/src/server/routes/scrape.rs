//! Scrape batch endpoint.
//!
//! POST /api/scrape, no body, no params.
//!
//! Setup problems (missing credentials, directory fetch failure) come back as
//! a one-shot `500 {"error": ...}` JSON document before any stream opens.
//! Otherwise the response is a long-lived SSE stream of progress frames; the
//! batch runs on a spawned task and the response body drains its channel, so
//! each frame is flushed as it is produced. The job lives only for this
//! request: if the client disconnects, the channel closes and the batch
//! stops.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::kernel::ServerDeps;
use crate::scrape::{partition_targets, run_batch, EventSink};
use crate::server::app::AxumAppState;

pub async fn scrape_handler(State(state): State<AxumAppState>) -> Response {
    let deps = match &state.deps_override {
        Some(deps) => deps.clone(),
        None => match state.config.credentials() {
            Ok(creds) => Arc::new(ServerDeps::from_credentials(&creds)),
            Err(err) => return setup_error(err.to_string()),
        },
    };

    // Fetch before opening the stream: without targets there is nothing to
    // stream, so a source failure is a setup error too.
    let startups = match deps.startup_source.fetch_startups().await {
        Ok(startups) => startups,
        Err(err) => {
            tracing::error!(error = %err, "Failed to fetch startups");
            return setup_error(err.to_string());
        }
    };

    let (targets, skipped) = partition_targets(startups);

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let sink = EventSink::new(tx);
        run_batch(deps.scraper.as_ref(), targets, skipped, &sink).await;
    });

    let stream = ReceiverStream::new(rx)
        .filter_map(|event| async move {
            Event::default()
                .json_data(&event)
                .ok()
                .map(Ok::<_, Infallible>)
        });

    let mut response = Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response();
    response.headers_mut().insert(
        axum::http::header::CACHE_CONTROL,
        axum::http::HeaderValue::from_static("no-cache"),
    );
    response
}

fn setup_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}
