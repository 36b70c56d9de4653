pub mod csv;
pub mod jsonl;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::parsers::HistoryRecord;

/// Per-document outcome of an extraction run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocumentSummary {
    pub run_id: String,
    pub document_id: String,
    pub kind: String,
    pub path: String,
    pub records: u64,
    pub errors: u64,
    pub tree_truncated: bool,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub documents_processed: u64,
    pub documents_failed: u64,
    pub records_extracted: u64,
    pub record_errors: u64,
}

#[derive(Debug, Clone, Copy)]
pub enum MetadataBackendKind {
    Jsonl,
    Csv,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("other error: {0}")]
    Other(String),
}

/// Output sink for extracted records and run bookkeeping.
///
/// # Example
/// ```rust
/// use takeout_history::metadata::{self, MetadataBackendKind, MetadataSink, RunSummary};
///
/// let run_output_dir = std::env::temp_dir().join("takeout_history_meta_example");
/// std::fs::create_dir_all(&run_output_dir).unwrap();
///
/// let sink = metadata::build_sink(
///     MetadataBackendKind::Jsonl,
///     "example_run",
///     "0.1.0",
///     "config-hash",
///     &run_output_dir,
/// )
/// .unwrap();
///
/// let summary = RunSummary {
///     run_id: "example_run".to_string(),
///     ..RunSummary::default()
/// };
/// sink.record_run_summary(&summary).unwrap();
/// sink.flush().unwrap();
/// ```
pub trait MetadataSink: Send + Sync {
    fn record_history(&self, document_id: &str, record: &HistoryRecord) -> Result<(), MetadataError>;
    fn record_document(&self, summary: &DocumentSummary) -> Result<(), MetadataError>;
    fn record_run_summary(&self, summary: &RunSummary) -> Result<(), MetadataError>;
    fn flush(&self) -> Result<(), MetadataError>;
}

/// A no-op sink for dry-run mode that doesn't write any files
pub struct DryRunSink;

impl MetadataSink for DryRunSink {
    fn record_history(&self, _document_id: &str, _record: &HistoryRecord) -> Result<(), MetadataError> {
        Ok(())
    }
    fn record_document(&self, _summary: &DocumentSummary) -> Result<(), MetadataError> {
        Ok(())
    }
    fn record_run_summary(&self, _summary: &RunSummary) -> Result<(), MetadataError> {
        Ok(())
    }
    fn flush(&self) -> Result<(), MetadataError> {
        Ok(())
    }
}

pub fn build_sink(
    backend: MetadataBackendKind,
    run_id: &str,
    tool_version: &str,
    config_hash: &str,
    run_output_dir: &Path,
) -> Result<Box<dyn MetadataSink>, MetadataError> {
    match backend {
        MetadataBackendKind::Jsonl => Ok(Box::new(jsonl::JsonlSink::new(
            run_id,
            tool_version,
            config_hash,
            run_output_dir,
        )?)),
        MetadataBackendKind::Csv => Ok(Box::new(csv::CsvSink::new(
            run_id,
            tool_version,
            config_hash,
            run_output_dir,
        )?)),
    }
}

/// Build a dry-run sink that doesn't write any files
pub fn build_dry_run_sink() -> Box<dyn MetadataSink> {
    Box::new(DryRunSink)
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, MetadataError> {
    mutex
        .lock()
        .map_err(|err| MetadataError::Other(format!("metadata writer lock poisoned: {err}")))
}
