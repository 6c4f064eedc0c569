//! Stage reports returned by the entry points in [`crate::stages`].

use crate::error::RecordError;
use crate::record::ProductRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Result of a normalizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Every record, in file order then row order.
    pub records: Vec<ProductRecord>,
    /// CSV files found in the input directory.
    pub files_found: usize,
    /// Files that contributed (possibly zero) records.
    pub files_processed: usize,
    /// Files that could not be read or parsed.
    pub skipped: Vec<RecordError>,
    /// Where the canonical store and its mirror were written.
    pub store_paths: Vec<PathBuf>,
}

impl NormalizeReport {
    /// Record count per source-file category, largest first, ties by name.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in &self.records {
            *counts.entry(r.category_file.as_str()).or_default() += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

/// Result of a page-rendering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    pub pages_written: usize,
    pub pages_dir: PathBuf,
    pub index_path: PathBuf,
}

/// Result of a QR generation run. Failures never abort the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrReport {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RecordError>,
    pub qr_dir: PathBuf,
    /// Base URL the codes point at.
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category_file: &str) -> ProductRecord {
        ProductRecord {
            category_file: category_file.into(),
            ..Default::default()
        }
    }

    #[test]
    fn category_counts_sorted_by_count_then_name() {
        let report = NormalizeReport {
            records: vec![
                record("Scarves"),
                record("Bags"),
                record("Hats"),
                record("Scarves"),
                record("Bags"),
                record("Scarves"),
            ],
            files_found: 3,
            files_processed: 3,
            skipped: vec![],
            store_paths: vec![],
        };
        assert_eq!(
            report.category_counts(),
            vec![
                ("Scarves".to_string(), 3),
                ("Bags".to_string(), 2),
                ("Hats".to_string(), 1),
            ]
        );
    }
}
