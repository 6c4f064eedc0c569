//! `generate-qr-codes`: SVG and PNG QR codes linking to each product page.

use anyhow::{Context, Result};
use catalog_build::cli::{bold, dim, green, init_tracing, red, CliProgress};
use catalog_build::{generate_qr_codes, ProgressCallback, SiteConfig};
use clap::Parser;

/// Write public/qr-codes/{id}.svg and .png for every product.
///
/// The encoded URL is `$SITE_URL/product/{id}.html`.
#[derive(Parser, Debug)]
#[command(name = "generate-qr-codes", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let progress = CliProgress::new("Encoding", "QR codes");
    let mut config = SiteConfig::from_env().context("Invalid configuration")?;
    config.progress_callback = Some(progress.clone() as ProgressCallback);

    let report = generate_qr_codes(&config)
        .await
        .context("Failed to generate QR codes")?;

    eprintln!(
        "{} Generated {} QR codes in {}",
        green("✓"),
        bold(&report.succeeded.to_string()),
        report.qr_dir.display(),
    );
    if report.failed > 0 {
        eprintln!("  {} {} failed", red("✗"), report.failed);
    }
    eprintln!(
        "{}",
        dim(&format!(
            "QR codes point to {}/product/{{id}}.html; set SITE_URL to change it.",
            report.base_url
        ))
    );

    Ok(())
}
