//! Scrape batch consumer.
//!
//! Kicks off a batch on the server, follows the progress stream, and writes
//! the final dataset to disk. Ctrl-C stops the run by dropping the request;
//! the server has no cancellation hook and the partial batch is discarded.

mod export;
mod state;
mod stream;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use server_core::scrape::ProgressEvent;

use state::BatchRunState;
use stream::FrameReader;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum ExportFormat {
    Csv,
    Xlsx,
    Json,
    All,
}

#[derive(Parser)]
#[command(name = "scrape", about = "Run a startup-website scrape batch and export the results")]
struct Args {
    /// Base URL of the scrape server
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,

    /// Directory for the exported files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Which export format(s) to write after completion
    #[arg(long, value_enum, default_value_t = ExportFormat::All)]
    format: ExportFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let state = follow_stream(&args).await?;

    if let Some(message) = &state.fatal_error {
        eprintln!();
        eprintln!("Scraping failed: {message}");
        eprintln!("Check .env.local: FIRECRAWL_API_KEY, SUPABASE_URL and SUPABASE_ANON_KEY must be set correctly.");
        std::process::exit(1);
    }

    let Some(results) = &state.results else {
        // Cancelled or the stream ended early; nothing to export.
        println!(
            "No results ({} of {} processed).",
            state.current, state.total
        );
        return Ok(());
    };

    println!(
        "Done: {} scraped, {} failed, {} skipped (no website).",
        state.success_count(),
        state.failure_count(),
        state.skipped
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create {}", args.out_dir.display()))?;

    if matches!(args.format, ExportFormat::Csv | ExportFormat::All) {
        let path = args.out_dir.join("scraped_startups.csv");
        export::write_csv(&path, results)?;
        println!("Wrote {}", path.display());
    }
    if matches!(args.format, ExportFormat::Xlsx | ExportFormat::All) {
        let path = args.out_dir.join("scraped_startups.xlsx");
        export::write_xlsx(&path, results)?;
        println!("Wrote {}", path.display());
    }
    if matches!(args.format, ExportFormat::Json | ExportFormat::All) {
        let path = args.out_dir.join("scraped_startups.json");
        export::write_json(&path, results)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// POST the batch trigger and consume the response incrementally.
async fn follow_stream(args: &Args) -> Result<BatchRunState> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/scrape", args.server))
        .send()
        .await
        .with_context(|| format!("connect to {}", args.server))?;

    let mut run = BatchRunState::new();

    // A JSON response means setup validation failed before any stream opened.
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if content_type.starts_with("application/json") {
        let body: serde_json::Value = resp.json().await.context("read error document")?;
        run.fatal_error = Some(
            body.get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Server reported a setup error")
                .to_string(),
        );
        run.is_running = false;
        return Ok(run);
    }
    if !resp.status().is_success() {
        bail!("Server error: {}", resp.status());
    }

    let mut body = resp.bytes_stream();
    let mut reader = FrameReader::new();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                run.cancel();
                println!("\nStopped.");
                break;
            }
            chunk = body.next() => match chunk {
                Some(Ok(bytes)) => {
                    for event in reader.push(&bytes) {
                        print_event(&event);
                        run.apply(event);
                    }
                }
                Some(Err(err)) => {
                    run.fatal_error = Some(err.to_string());
                    run.is_running = false;
                    break;
                }
                None => {
                    run.is_running = false;
                    break;
                }
            }
        }
    }

    Ok(run)
}

fn print_event(event: &ProgressEvent) {
    match event {
        ProgressEvent::Init { total, skipped } => {
            println!("Scraping {total} startups ({skipped} skipped, no website)");
        }
        ProgressEvent::Progress {
            index,
            total,
            name,
            success,
            content_length,
            error,
        } => {
            if *success {
                println!(
                    "[{index}/{total}] {name}: ok ({} chars)",
                    content_length.unwrap_or(0)
                );
            } else {
                println!(
                    "[{index}/{total}] {name}: FAILED{}",
                    error
                        .as_deref()
                        .map(|e| format!(" - {e}"))
                        .unwrap_or_default()
                );
            }
        }
        ProgressEvent::Error { message } => {
            println!("Batch aborted: {message}");
        }
        ProgressEvent::Done { results } => {
            println!("Received {} results", results.len());
        }
    }
}
