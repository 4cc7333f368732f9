//! Export of a completed batch.
//!
//! CSV and XLSX expand one row per employee (or one blank-employee row),
//! duplicating the startup's shared fields per row. JSON is the raw dataset,
//! one record per startup with the full scraped text.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use server_core::scrape::types::ScrapeOutcome;

pub const EXPORT_HEADERS: [&str; 13] = [
    "Startup Name",
    "Website",
    "Sector",
    "Location",
    "Funding Round",
    "Funding Amount",
    "Tags",
    "Scraped Content (excerpt)",
    "Scrape Error",
    "Employee Name",
    "Employee Role",
    "Employee Email",
    "Employee LinkedIn",
];

pub const CONTENT_EXCERPT_CHARS: usize = 500;

/// First `max_chars` characters, never splitting a code point.
fn excerpt(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}

/// Expand outcomes into tabular rows, one per employee.
pub fn flatten_rows(results: &[ScrapeOutcome]) -> Vec<Vec<String>> {
    results
        .iter()
        .flat_map(|r| {
            let base = vec![
                r.name.clone(),
                r.website.clone(),
                r.sector.clone().unwrap_or_default(),
                r.location.clone().unwrap_or_default(),
                r.funding_round.clone().unwrap_or_default(),
                r.funding_amount.clone().unwrap_or_default(),
                r.tags.join(", "),
                excerpt(&r.content, CONTENT_EXCERPT_CHARS),
                r.error.clone().unwrap_or_default(),
            ];

            if r.employees.is_empty() {
                let mut row = base;
                row.extend(std::iter::repeat(String::new()).take(4));
                return vec![row];
            }

            r.employees
                .iter()
                .map(|e| {
                    let mut row = base.clone();
                    row.push(e.name.clone());
                    row.push(e.role.clone().unwrap_or_default());
                    row.push(e.email.clone().unwrap_or_default());
                    row.push(e.linkedin_url.clone().unwrap_or_default());
                    row
                })
                .collect()
        })
        .collect()
}

pub fn write_csv_to<W: Write>(writer: W, results: &[ScrapeOutcome]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;
    for row in flatten_rows(results) {
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, results: &[ScrapeOutcome]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv_to(file, results)
}

pub fn write_xlsx(path: &Path, results: &[ScrapeOutcome]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Scraped Startups")?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (row, cells) in flatten_rows(results).iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, cell)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;
    Ok(())
}

pub fn write_json(path: &Path, results: &[ScrapeOutcome]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}
