//! Progress-callback trait for per-record stage events.
//!
//! Inject an [`Arc<dyn BuildProgressCallback>`] via
//! [`crate::config::SiteConfigBuilder::progress_callback`] to receive events
//! as a stage walks the record sequence. The binaries use it to drive a
//! terminal progress bar; library callers can forward the events anywhere.
//!
//! # Example
//!
//! ```rust
//! use catalog_build::{BuildProgressCallback, SiteConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     done: AtomicUsize,
//! }
//!
//! impl BuildProgressCallback for CountingCallback {
//!     fn on_item_complete(&self, index: usize, total: usize, id: &str) {
//!         self.done.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{index}/{total} {id}");
//!     }
//! }
//!
//! let config = SiteConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { done: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by a stage as it processes each item.
///
/// For the normalizer an item is one CSV file (the id argument carries the
/// file name); for the page and QR stages it is one record. All methods
/// default to no-ops.
pub trait BuildProgressCallback: Send + Sync {
    /// Called once before the first item.
    fn on_stage_start(&self, total: usize) {
        let _ = total;
    }

    /// Called when an item was processed successfully.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position of the item
    /// * `total` — number of items in the stage
    /// * `id`    — product id (or file name for the normalizer)
    fn on_item_complete(&self, index: usize, total: usize, id: &str) {
        let _ = (index, total, id);
    }

    /// Called when an item failed but the stage carries on.
    fn on_item_error(&self, index: usize, total: usize, id: &str, error: &str) {
        let _ = (index, total, id, error);
    }

    /// Called once after every item has been attempted.
    fn on_stage_complete(&self, total: usize, succeeded: usize) {
        let _ = (total, succeeded);
    }
}

/// A no-op implementation, the default when no callback is configured.
pub struct NoopProgressCallback;

impl BuildProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::SiteConfig`].
pub type ProgressCallback = Arc<dyn BuildProgressCallback>;
