//! Drives extraction over every configured document of an export.
//!
//! Documents are handled one after another. An unreadable document is
//! counted as failed and the run moves on; records go to the sink in
//! document order, followed by that document's summary.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{Config, DocumentConfig};
use crate::metadata::{DocumentSummary, MetadataSink, RunSummary};
use crate::parsers::{ClassNames, Extraction, ParseError, extract_records, load_document};

/// Result of processing a single document.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub summary: DocumentSummary,
    pub extraction: Extraction,
}

/// Parse one document and extract its records.
///
/// A tree that stopped early on an unbalanced closing tag still yields the
/// records built before the stop; the stop itself adds one to `errors`.
pub fn process_document(
    run_id: &str,
    doc: &DocumentConfig,
    export_root: &Path,
    classes: &ClassNames,
) -> Result<DocumentOutcome, ParseError> {
    let path = export_root.join(&doc.path);
    let outcome = load_document(&path)?;
    if let Some(err) = &outcome.error {
        warn!("document {} truncated: {err}", doc.id);
    }
    if outcome.document.is_empty() {
        warn!("document {} contains no tags: {}", doc.id, path.display());
    }

    let extraction = extract_records(outcome.document.root(), doc.kind, classes);
    let summary = DocumentSummary {
        run_id: run_id.to_string(),
        document_id: doc.id.clone(),
        kind: doc.kind.as_str().to_string(),
        path: doc.path.display().to_string(),
        records: extraction.records.len() as u64,
        errors: extraction.errors + u64::from(outcome.is_truncated()),
        tree_truncated: outcome.is_truncated(),
    };

    Ok(DocumentOutcome {
        summary,
        extraction,
    })
}

/// Run every configured document through the sink and return the totals.
pub fn run_extraction(
    cfg: &Config,
    export_root: &Path,
    sink: &dyn MetadataSink,
) -> Result<RunSummary> {
    let mut run = RunSummary {
        run_id: cfg.run_id.clone(),
        ..RunSummary::default()
    };

    for doc in &cfg.documents {
        let outcome = match process_document(&cfg.run_id, doc, export_root, &cfg.classes) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("document {} failed: {err}", doc.id);
                run.documents_failed += 1;
                continue;
            }
        };

        for record in &outcome.extraction.records {
            sink.record_history(&doc.id, record)?;
        }
        sink.record_document(&outcome.summary)?;

        info!(
            "document {} kind={} records={} errors={}",
            doc.id, outcome.summary.kind, outcome.summary.records, outcome.summary.errors
        );

        run.documents_processed += 1;
        run.records_extracted += outcome.summary.records;
        run.record_errors += outcome.summary.errors;
    }

    sink.record_run_summary(&run)?;
    sink.flush()?;
    Ok(run)
}
