//! Canonical store: the JSON record sequence shared by every stage.

use crate::error::CatalogError;
use crate::record::ProductRecord;
use std::path::Path;
use tracing::debug;

/// Serialise records the way the frontend expects: a pretty-printed JSON
/// array with two-space indentation.
pub fn to_json(records: &[ProductRecord]) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write `contents` to `path`, creating parent directories.
///
/// Uses atomic write (temp file + rename) so a reader never sees a
/// half-written store.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), CatalogError> {
    let write_err = |source| CatalogError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, contents).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Write the same serialisation to every path, in order.
pub async fn write_store(records: &[ProductRecord], paths: &[&Path]) -> Result<(), CatalogError> {
    let json = to_json(records)?;
    for path in paths {
        write_atomic(path, json.as_bytes()).await?;
    }
    Ok(())
}

/// Load the record sequence produced by the normalizer.
///
/// A missing file is [`CatalogError::StoreNotFound`]; downstream stages
/// never fall back to anything else.
pub async fn read_store(path: &Path) -> Result<Vec<ProductRecord>, CatalogError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CatalogError::StoreNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(CatalogError::StoreCorrupt {
                path: path.to_path_buf(),
                detail: e.to_string(),
            });
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| CatalogError::StoreCorrupt {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}
