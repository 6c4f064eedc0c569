//! Stage entry points: normalizer, page renderer, QR generator.
//!
//! Each stage is a sequential batch job over the whole input. Fatal
//! preconditions (missing input directory or canonical store) come back as
//! `Err(CatalogError)` before anything is written; per-file and per-record
//! failures are logged, reported through the progress callback, and
//! collected in the returned report.

use crate::config::SiteConfig;
use crate::error::{CatalogError, RecordError};
use crate::output::{NormalizeReport, PageReport, QrReport};
use crate::pipeline::ids::IdSequence;
use crate::pipeline::qr::{product_url, render_qr};
use crate::pipeline::{normalize, page, store};
use crate::record::ProductRecord;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parse every CSV export into the canonical store.
///
/// Files are processed in file-name order and rows in file order; the id
/// counter runs across all files. The store is written to
/// `data/products.json` and mirrored to `public/data/products.json`.
///
/// # Errors
/// Returns `Err(CatalogError)` only for fatal errors:
/// - CSV directory missing or unreadable
/// - store cannot be serialised or written
pub async fn parse_csvs(config: &SiteConfig) -> Result<NormalizeReport, CatalogError> {
    let start = Instant::now();
    let csv_dir = config.csv_dir();
    info!("Starting CSV parsing: {}", csv_dir.display());

    // ── Step 1: List input files ─────────────────────────────────────────
    let files = list_csv_files(&csv_dir).await?;
    let total = files.len();
    info!("Found {} CSV files", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(total);
    }

    // ── Step 2: Normalize each file ──────────────────────────────────────
    let mut ids = IdSequence::new();
    let mut records: Vec<ProductRecord> = Vec::new();
    let mut skipped = Vec::new();

    for (i, path) in files.iter().enumerate() {
        let file_name = file_name_of(path);
        let result = match tokio::fs::read(path).await {
            Ok(bytes) => normalize::normalize_file(&file_name, &bytes, &mut ids)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(mut file_records) => {
                info!("Processed {}: {} valid products", file_name, file_records.len());
                records.append(&mut file_records);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_complete(i + 1, total, &file_name);
                }
            }
            Err(detail) => {
                warn!("Skipping {}: {}", file_name, detail);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_error(i + 1, total, &file_name, &detail);
                }
                skipped.push(RecordError::FileSkipped {
                    file: file_name,
                    detail,
                });
            }
        }
    }

    // ── Step 3: Persist store + public mirror ────────────────────────────
    let store_path = config.store_path();
    let public_path = config.public_store_path();
    store::write_store(&records, &[store_path.as_path(), public_path.as_path()]).await?;

    let processed = total - skipped.len();
    info!(
        "Parsed {} products from {}/{} CSV files in {}ms",
        records.len(),
        processed,
        total,
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(total, processed);
    }

    Ok(NormalizeReport {
        records,
        files_found: total,
        files_processed: processed,
        skipped,
        store_paths: vec![store_path, public_path],
    })
}

/// Render one HTML page per record plus the QR index page.
///
/// # Errors
/// - canonical store missing ([`CatalogError::StoreNotFound`]) or corrupt
/// - the first page that cannot be written aborts the run with
///   [`CatalogError::RecordWriteFailed`]
pub async fn generate_pages(config: &SiteConfig) -> Result<PageReport, CatalogError> {
    let start = Instant::now();
    let records = store::read_store(&config.store_path()).await?;
    let total = records.len();
    info!("Found {} products", total);

    let pages_dir = config.pages_dir();
    create_dir(&pages_dir).await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(total);
    }

    for (i, record) in records.iter().enumerate() {
        let html = page::render_product_page(record, &config.base_url);
        let path = pages_dir.join(format!("{}.html", record.id));
        tokio::fs::write(&path, html)
            .await
            .map_err(|source| CatalogError::RecordWriteFailed {
                id: record.id.clone(),
                path: path.clone(),
                source,
            })?;
        debug!("Wrote {}", path.display());

        if let Some(ref cb) = config.progress_callback {
            cb.on_item_complete(i + 1, total, &record.id);
        }
    }

    let index_path = config.qr_index_path();
    let index = page::render_qr_index(&records, &config.base_url);
    tokio::fs::write(&index_path, index)
        .await
        .map_err(|source| CatalogError::OutputWriteFailed {
            path: index_path.clone(),
            source,
        })?;

    info!(
        "Generated {} product pages in {}ms",
        total,
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(total, total);
    }

    Ok(PageReport {
        pages_written: total,
        pages_dir,
        index_path,
    })
}

/// Render an SVG and a PNG QR code per record.
///
/// A record whose code cannot be encoded or written is logged and counted
/// in [`QrReport::failed`]; the run carries on with the next record.
///
/// # Errors
/// - canonical store missing or corrupt
/// - the output directory cannot be created
pub async fn generate_qr_codes(config: &SiteConfig) -> Result<QrReport, CatalogError> {
    let start = Instant::now();
    let records = store::read_store(&config.store_path()).await?;
    let total = records.len();
    info!("Found {} products, QR codes point to {}", total, config.base_url);

    let qr_dir = config.qr_dir();
    create_dir(&qr_dir).await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(total);
    }

    let mut failures = Vec::new();
    for (i, record) in records.iter().enumerate() {
        match write_qr_codes(record, &config.base_url, &qr_dir).await {
            Ok(()) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_complete(i + 1, total, &record.id);
                }
            }
            Err(detail) => {
                warn!("Failed to generate QR for {}: {}", record.name, detail);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_error(i + 1, total, &record.id, &detail);
                }
                failures.push(RecordError::QrFailed {
                    id: record.id.clone(),
                    detail,
                });
            }
        }
    }

    let failed = failures.len();
    let succeeded = total - failed;
    info!(
        "Generated {} QR codes ({} failed) in {}ms",
        succeeded,
        failed,
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(total, succeeded);
    }

    Ok(QrReport {
        succeeded,
        failed,
        failures,
        qr_dir,
        base_url: config.base_url.clone(),
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// `*.csv` files directly under `dir`, sorted by file name.
async fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(CatalogError::InputDirNotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CatalogError::InputDirNotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(CatalogError::InputDirUnreadable {
                path: dir.to_path_buf(),
                source,
            })
        }
    }

    let unreadable = |source| CatalogError::InputDirUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(unreadable)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }

    files.sort_by_key(|p| file_name_of(p));
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

async fn create_dir(dir: &Path) -> Result<(), CatalogError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| CatalogError::OutputWriteFailed {
            path: dir.to_path_buf(),
            source,
        })
}

/// Encode, render and write both QR files for one record.
async fn write_qr_codes(record: &ProductRecord, base_url: &str, qr_dir: &Path) -> Result<(), String> {
    let url = product_url(base_url, &record.id);
    debug!("Encoding {}", url);

    // Rasterising is CPU-bound; keep it off the async worker threads.
    let artifacts = tokio::task::spawn_blocking(move || render_qr(&url))
        .await
        .map_err(|e| format!("QR task panicked: {e}"))??;

    let svg_path = qr_dir.join(format!("{}.svg", record.id));
    tokio::fs::write(&svg_path, artifacts.svg)
        .await
        .map_err(|e| format!("writing {}: {e}", svg_path.display()))?;

    let png_path = qr_dir.join(format!("{}.png", record.id));
    tokio::fs::write(&png_path, artifacts.png)
        .await
        .map_err(|e| format!("writing {}: {e}", png_path.display()))?;

    Ok(())
}
