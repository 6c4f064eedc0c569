//! Configuration for a catalog build.
//!
//! Every stage takes a [`SiteConfig`]: the site root all input and output
//! paths hang off, the public base URL embedded into share links and QR
//! codes, and an optional progress callback. The only environment-level
//! override is `SITE_URL`, read by [`SiteConfig::from_env`].

use crate::error::CatalogError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the public base URL.
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Base URL used when `SITE_URL` is unset or empty.
pub const DEFAULT_BASE_URL: &str = "https://your-site.netlify.app";

/// Directory (under the site root) holding the spreadsheet exports.
pub const CSV_DIR: &str = "csvs";
/// Canonical store, read by the page and QR stages.
pub const STORE_FILE: &str = "data/products.json";
/// Mirror of the canonical store served to the frontend.
pub const PUBLIC_STORE_FILE: &str = "public/data/products.json";
/// One HTML page per product.
pub const PAGES_DIR: &str = "public/product";
/// Searchable table of every product and its QR code.
pub const QR_INDEX_FILE: &str = "public/qr-index.html";
/// One SVG and one PNG per product.
pub const QR_DIR: &str = "public/qr-codes";

/// Configuration shared by the three pipeline stages.
///
/// Built via [`SiteConfig::builder()`], [`SiteConfig::from_env()`] or
/// [`SiteConfig::default()`].
///
/// # Example
/// ```rust
/// use catalog_build::SiteConfig;
///
/// let config = SiteConfig::builder()
///     .root("/tmp/site")
///     .base_url("https://shop.example.com/")
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "https://shop.example.com");
/// assert!(config.store_path().ends_with("data/products.json"));
/// ```
#[derive(Clone)]
pub struct SiteConfig {
    /// Directory every input and output path is resolved against. Default: `.`.
    pub root: PathBuf,

    /// Public root URL the pages are published under, without a trailing
    /// slash. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Optional per-item progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base_url: DEFAULT_BASE_URL.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("root", &self.root)
            .field("base_url", &self.base_url)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BuildProgressCallback>"),
            )
            .finish()
    }
}

impl SiteConfig {
    /// Create a new builder for `SiteConfig`.
    pub fn builder() -> SiteConfigBuilder {
        SiteConfigBuilder {
            config: Self::default(),
        }
    }

    /// Configuration for the current directory with the base URL taken from
    /// `SITE_URL`.
    pub fn from_env() -> Result<Self, CatalogError> {
        Self::builder()
            .base_url(base_url_or_default(std::env::var(SITE_URL_ENV).ok()))
            .build()
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.root.join(CSV_DIR)
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(STORE_FILE)
    }

    pub fn public_store_path(&self) -> PathBuf {
        self.root.join(PUBLIC_STORE_FILE)
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(PAGES_DIR)
    }

    pub fn qr_index_path(&self) -> PathBuf {
        self.root.join(QR_INDEX_FILE)
    }

    pub fn qr_dir(&self) -> PathBuf {
        self.root.join(QR_DIR)
    }
}

/// Resolve the `SITE_URL` value: unset or blank falls back to the placeholder.
pub fn base_url_or_default(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().trim_end_matches('/').is_empty() => v.trim().to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// Builder for [`SiteConfig`].
#[derive(Debug)]
pub struct SiteConfigBuilder {
    config: SiteConfig,
}

impl SiteConfigBuilder {
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.config.root = root.as_ref().to_path_buf();
        self
    }

    /// Trailing slashes are dropped so `{base_url}/product/{id}.html` never
    /// doubles them.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// Any non-empty base URL is kept as given; one without an
    /// `http(s)://` scheme only logs a warning.
    pub fn build(self) -> Result<SiteConfig, CatalogError> {
        let url = &self.config.base_url;
        if url.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "base URL must not be empty".to_string(),
            ));
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            warn!("Base URL '{}' has no http:// or https:// scheme", url);
        }
        Ok(self.config)
    }
}
