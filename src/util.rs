//! # Utility Module
//!
//! CLI-to-config glue: backend selection, document filtering and output
//! directory checks.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::warn;

use crate::config::Config;
use crate::metadata::MetadataBackendKind;

/// Convert CLI metadata backend to internal enum
pub fn backend_from_cli(backend: crate::cli::MetadataBackend) -> MetadataBackendKind {
    match backend {
        crate::cli::MetadataBackend::Jsonl => MetadataBackendKind::Jsonl,
        crate::cli::MetadataBackend::Csv => MetadataBackendKind::Csv,
    }
}

/// Keep only the listed document ids. Returns the ids that matched nothing.
pub fn filter_documents(cfg: &mut Config, ids: Option<&[String]>) -> Vec<String> {
    let Some(ids) = ids else {
        return Vec::new();
    };
    let wanted: Vec<String> = ids
        .iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let unknown = wanted
        .iter()
        .filter(|id| !cfg.documents.iter().any(|d| &d.id == *id))
        .cloned()
        .collect();
    cfg.documents.retain(|d| wanted.contains(&d.id));
    unknown
}

/// Ensure output directory exists and is writable, warning on unsafe permissions.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_dir() {
            return Err(anyhow!(
                "output path is not a directory: {}",
                path.display()
            ));
        }
    } else {
        std::fs::create_dir_all(path)?;
    }

    let probe_path = path.join(".takeout_history_write_probe");
    match OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&probe_path)
    {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe_path);
        }
        Err(err) => {
            return Err(anyhow!(
                "output directory is not writable: {} ({})",
                path.display(),
                err
            ));
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)?.permissions().mode();
        if mode & 0o002 != 0 {
            warn!("output directory is world-writable: {}", path.display());
        }
    }

    Ok(())
}
