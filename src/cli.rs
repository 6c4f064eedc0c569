//! Terminal helpers shared by the three binaries (feature `cli`).

use crate::progress::BuildProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

pub fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
pub fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
pub fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
pub fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
pub fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins; otherwise only warnings are shown so they don't fight
/// with the progress bar.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Progress bar for one stage. `noun` labels the counter ("files",
/// "pages", "QR codes").
pub struct CliProgress {
    bar: ProgressBar,
    noun: &'static str,
    errors: AtomicUsize,
}

impl CliProgress {
    pub fn new(prefix: &'static str, noun: &'static str) -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_prefix(prefix);
        Arc::new(Self {
            bar,
            noun,
            errors: AtomicUsize::new(0),
        })
    }

    /// Items that reported an error so far.
    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl BuildProgressCallback for CliProgress {
    fn on_stage_start(&self, total: usize) {
        let style = ProgressStyle::with_template(&format!(
            "{{prefix:.bold}}  [{{bar:40.green/238}}] {{pos:>4}}/{{len}} {}  {{msg}}",
            self.noun
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_style(style);
        self.bar.set_length(total as u64);
    }

    fn on_item_complete(&self, _index: usize, _total: usize, id: &str) {
        self.bar.set_message(id.to_string());
        self.bar.inc(1);
    }

    fn on_item_error(&self, _index: usize, _total: usize, id: &str, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.bar
            .println(format!("  {} {}  {}", red("✗"), id, dim(error)));
        self.bar.inc(1);
    }

    fn on_stage_complete(&self, _total: usize, _succeeded: usize) {
        self.bar.finish_and_clear();
    }
}
