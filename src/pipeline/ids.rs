//! Product identifiers: `{category}-{label or name}-{counter}`.
//!
//! Ids end up in file names and URLs, so every segment is slugged down to
//! `[a-z0-9-]`. The trailing counter makes ids unique within one run even
//! when two rows share category and label; it is a plain value owned by
//! the caller and threaded through row processing.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lowercase, collapse every run of characters outside `[a-z0-9]` into a
/// single `-`, and strip leading/trailing hyphens.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    RE_NON_ALNUM
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Run-local id counter. Starts at 1 and never resets within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The counter value the next id will carry.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Number of ids drawn so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }

    /// Draw the next id.
    ///
    /// The label is preferred; the name is used when the label slugs to
    /// nothing. Empty segments are left out so the id never starts with or
    /// doubles a hyphen.
    pub fn next_id(&mut self, category: &str, label: &str, name: &str) -> String {
        let counter = self.next;
        self.next += 1;

        let category = slugify(category);
        let label = slugify(label);
        let basis = if label.is_empty() { slugify(name) } else { label };

        let counter = counter.to_string();
        [category.as_str(), basis.as_str(), counter.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("-")
    }
}
