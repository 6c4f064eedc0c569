//! # catalog-build
//!
//! Build a static product catalog from spreadsheet CSV exports.
//!
//! ## Pipeline Overview
//!
//! ```text
//! csvs/*.csv
//!  │
//!  ├─ 1. parse-csvs         normalize rows → data/products.json (+ public mirror)
//!  ├─ 2. generate-pages     one HTML page per product + qr-index.html
//!  └─ 3. generate-qr-codes  one SVG + PNG QR code per product
//! ```
//!
//! Stages 2 and 3 only read the canonical store and write disjoint
//! directories, so they can run in either order once stage 1 is done.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog_build::{generate_pages, generate_qr_codes, parse_csvs, SiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL from SITE_URL, paths relative to the current directory
//!     let config = SiteConfig::from_env()?;
//!     let parsed = parse_csvs(&config).await?;
//!     eprintln!("{} products", parsed.records.len());
//!     generate_pages(&config).await?;
//!     let qr = generate_qr_codes(&config).await?;
//!     eprintln!("{} QR codes, {} failed", qr.succeeded, qr.failed);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the three binaries (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod stages;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SiteConfig, SiteConfigBuilder};
pub use error::{CatalogError, RecordError};
pub use output::{NormalizeReport, PageReport, QrReport};
pub use progress::{BuildProgressCallback, NoopProgressCallback, ProgressCallback};
pub use record::ProductRecord;
pub use stages::{generate_pages, generate_qr_codes, parse_csvs};
