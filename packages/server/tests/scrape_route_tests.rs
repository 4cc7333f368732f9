//! Route-level tests: one-shot setup errors and the streamed response body.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use server_core::kernel::test_dependencies::{MockStartupSource, MockWebScraper, ScriptedScrape};
use server_core::kernel::{AppConfig, ServerDeps};
use server_core::scrape::types::Startup;
use server_core::scrape::ProgressEvent;
use server_core::server::{build_app, AxumAppState};
use tower::ServiceExt;

fn startup(name: &str, website: Option<&str>) -> Startup {
    Startup {
        id: None,
        name: name.to_string(),
        description: None,
        website: website.map(|w| w.to_string()),
        sector: None,
        location: None,
        funding_round: None,
        funding_amount: None,
        funding_date: None,
        team_size: None,
        slug: None,
        created_at: None,
        startup_employees: Vec::new(),
        startup_tags: Vec::new(),
    }
}

fn scrape_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/scrape")
        .body(Body::empty())
        .expect("request")
}

/// Split an SSE body into parsed data frames.
fn parse_frames(body: &str) -> Vec<ProgressEvent> {
    body.split("\n\n")
        .filter_map(|block| {
            let data: String = block
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(|rest| rest.trim_start())
                .collect();
            if data.is_empty() {
                return None;
            }
            serde_json::from_str(&data).ok()
        })
        .collect()
}

#[tokio::test]
async fn missing_credentials_return_one_shot_json_error() {
    let app = build_app(AxumAppState::new(Arc::new(AppConfig::default())));

    let response = app.oneshot(scrape_request()).await.expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    let message = json["error"].as_str().expect("error field");
    assert!(message.contains("FIRECRAWL_API_KEY"));
    assert!(message.contains(".env.local"));
}

#[tokio::test]
async fn source_failure_returns_one_shot_json_error() {
    let deps = ServerDeps::new(
        Arc::new(MockWebScraper::new()),
        Arc::new(MockStartupSource::failing(503, "upstream unavailable")),
    );
    let app = build_app(AxumAppState::with_deps(
        Arc::new(AppConfig::default()),
        Arc::new(deps),
    ));

    let response = app.oneshot(scrape_request()).await.expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    let message = json["error"].as_str().expect("error field");
    assert!(message.contains("503"));
    assert!(message.contains("upstream unavailable"));
}

#[tokio::test]
async fn successful_batch_streams_init_progress_done() {
    let scraper = MockWebScraper::new()
        .then(ScriptedScrape::Success("# Acme landing page".to_string()));
    let deps = ServerDeps::new(
        Arc::new(scraper),
        Arc::new(MockStartupSource::with_startups(vec![
            startup("Acme", Some("https://acme.example")),
            startup("NoSite", None),
        ])),
    );
    let app = build_app(AxumAppState::with_deps(
        Arc::new(AppConfig::default()),
        Arc::new(deps),
    ));

    let response = app.oneshot(scrape_request()).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
    let frames = parse_frames(&body);

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], ProgressEvent::Init { total: 1, skipped: 1 });
    match &frames[1] {
        ProgressEvent::Progress {
            index,
            total,
            name,
            success,
            ..
        } => {
            assert_eq!((*index, *total), (1, 1));
            assert_eq!(name, "Acme");
            assert!(success);
        }
        other => panic!("expected progress, got {other:?}"),
    }
    match &frames[2] {
        ProgressEvent::Done { results } => {
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].content, "# Acme landing page");
        }
        other => panic!("expected done, got {other:?}"),
    }
}

#[tokio::test]
async fn auth_abort_streams_init_then_terminal_error() {
    let scraper = MockWebScraper::new().then(ScriptedScrape::TransportFailure(
        "Firecrawl API error (401): Unauthorized".to_string(),
    ));
    let deps = ServerDeps::new(
        Arc::new(scraper),
        Arc::new(MockStartupSource::with_startups(vec![
            startup("Acme", Some("https://acme.example")),
            startup("Beta", Some("https://beta.example")),
        ])),
    );
    let app = build_app(AxumAppState::with_deps(
        Arc::new(AppConfig::default()),
        Arc::new(deps),
    ));

    let response = app.oneshot(scrape_request()).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
    let frames = parse_frames(&body);

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0], ProgressEvent::Init { total: 2, skipped: 0 });
    match &frames[1] {
        ProgressEvent::Error { message } => {
            assert!(message.starts_with("Firecrawl API key error:"));
            assert!(message.contains("401"));
            assert!(message.contains("Check FIRECRAWL_API_KEY"));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let app = build_app(AxumAppState::new(Arc::new(AppConfig::default())));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
