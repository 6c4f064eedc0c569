//! Error types for the catalog-build library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`CatalogError`] — **Fatal**: the stage cannot proceed at all (input
//!   directory missing, canonical store absent or unreadable, a page that
//!   cannot be written). Returned as `Err(CatalogError)` from the stage
//!   entry points in [`crate::stages`].
//!
//! * [`RecordError`] — **Non-fatal**: one input file or one record failed
//!   (unparseable CSV, QR encode or write failure) while everything else is
//!   fine. Collected inside the stage reports in [`crate::output`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the catalog-build library.
#[derive(Debug, Error)]
pub enum CatalogError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The CSV input directory does not exist.
    #[error("CSV input directory not found: '{path}'\nPut the exported spreadsheets in this directory.")]
    InputDirNotFound { path: PathBuf },

    /// The CSV input directory exists but could not be listed.
    #[error("Failed to read CSV input directory '{path}': {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Canonical store errors ────────────────────────────────────────────
    /// Downstream stages need the canonical store produced by `parse-csvs`.
    #[error("Products file not found: '{path}'\nRun `parse-csvs` first.")]
    StoreNotFound { path: PathBuf },

    /// The canonical store exists but is not a valid record sequence.
    #[error("Products file '{path}' is corrupt: {detail}\nRe-run `parse-csvs` to regenerate it.")]
    StoreCorrupt { path: PathBuf, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write a stage-level output file or directory.
    #[error("Failed to write output '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write the page of one record; aborts the page run.
    #[error("Failed to write page for product '{id}' to '{path}': {source}")]
    RecordWriteFailed {
        id: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record sequence could not be serialised.
    #[error("Failed to serialise products: {0}")]
    Serialize(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single input file or record.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum RecordError {
    /// The CSV file could not be read or parsed; it contributes no records.
    #[error("{file}: skipped: {detail}")]
    FileSkipped { file: String, detail: String },

    /// QR code generation or writing failed for one product.
    #[error("{id}: QR generation failed: {detail}")]
    QrFailed { id: String, detail: String },
}
