//! `generate-pages`: one static HTML page per product.

use anyhow::{Context, Result};
use catalog_build::cli::{bold, dim, green, init_tracing, CliProgress};
use catalog_build::{generate_pages, ProgressCallback, SiteConfig};
use clap::Parser;

/// Render public/product/{id}.html for every product in data/products.json.
#[derive(Parser, Debug)]
#[command(name = "generate-pages", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let progress = CliProgress::new("Rendering", "pages");
    let mut config = SiteConfig::from_env().context("Invalid configuration")?;
    config.progress_callback = Some(progress.clone() as ProgressCallback);

    let report = generate_pages(&config)
        .await
        .context("Failed to generate product pages")?;

    eprintln!(
        "{} Generated {} product pages in {}",
        green("✓"),
        bold(&report.pages_written.to_string()),
        report.pages_dir.display(),
    );
    eprintln!("{}", dim(&format!("QR index: {}", report.index_path.display())));

    Ok(())
}
