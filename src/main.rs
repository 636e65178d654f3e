use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use listing_report::{load_listings, render, summarize, RowPolicy};

#[derive(Parser)]
#[command(name = "listing-report")]
#[command(about = "Summarize an Inside Airbnb listings CSV")]
#[command(version)]
struct Cli {
    /// Path to the listings CSV export
    #[arg(default_value = "chicago_listings.csv")]
    input: PathBuf,

    /// Also write the report to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Fail on the first malformed row instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Emit the summary as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let policy = if cli.strict {
        RowPolicy::Strict
    } else {
        RowPolicy::SkipInvalid
    };

    // Progress and warnings go to stderr; stdout carries the report alone.
    eprintln!("📂 Loading {}...", cli.input.display());
    let dataset = load_listings(&cli.input, policy)?;

    for issue in &dataset.warnings {
        eprintln!("⚠️  {}", issue);
    }
    if dataset.skipped_rows > 0 {
        eprintln!(
            "✓ Loaded {} listings ({} rows skipped)",
            dataset.listings.len(),
            dataset.skipped_rows
        );
    } else {
        eprintln!("✓ Loaded {} listings", dataset.listings.len());
    }

    let summary = summarize(&dataset.listings);
    eprintln!("✓ {}", summary.headline());

    let source = cli
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("listings.csv");

    let report = if cli.json {
        serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
    } else {
        render(&summary, source)
    };

    println!("{}", report);

    if let Some(path) = &cli.output {
        fs::write(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        eprintln!("✓ Report written to {}", path.display());
    }

    Ok(())
}
