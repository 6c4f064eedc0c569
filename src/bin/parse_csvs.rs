//! `parse-csvs`: normalize `csvs/*.csv` into the canonical product store.

use anyhow::{Context, Result};
use catalog_build::cli::{bold, dim, green, init_tracing, yellow, CliProgress};
use catalog_build::{parse_csvs, ProgressCallback, SiteConfig};
use clap::Parser;

/// Parse the product CSV exports in ./csvs into data/products.json.
#[derive(Parser, Debug)]
#[command(name = "parse-csvs", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let progress = CliProgress::new("Parsing", "files");
    let mut config = SiteConfig::from_env().context("Invalid configuration")?;
    config.progress_callback = Some(progress.clone() as ProgressCallback);

    let report = parse_csvs(&config)
        .await
        .context("Failed to parse CSV files")?;

    eprintln!(
        "{} Parsed {} products from {}/{} CSV files",
        green("✓"),
        bold(&report.records.len().to_string()),
        report.files_processed,
        report.files_found,
    );
    if progress.errors() > 0 {
        eprintln!("  {} {} files skipped", yellow("!"), progress.errors());
    }
    eprintln!("\nCategories:");
    for (category, count) in report.category_counts() {
        eprintln!("  {category}: {count}");
    }
    for path in &report.store_paths {
        eprintln!("{}", dim(&format!("Wrote {}", path.display())));
    }

    Ok(())
}
