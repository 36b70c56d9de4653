use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use crate::metadata::{DocumentSummary, MetadataError, MetadataSink, RunSummary, lock};
use crate::parsers::{HistoryRecord, RecordPayload};

pub struct CsvSink {
    run_id: String,
    tool_version: String,
    config_hash: String,
    history_writer: Mutex<csv::Writer<File>>,
    documents_writer: Mutex<csv::Writer<File>>,
    run_writer: Mutex<csv::Writer<File>>,
}

#[derive(Serialize)]
struct HistoryCsv<'a> {
    run_id: &'a str,
    document_id: &'a str,
    kind: &'a str,
    product: &'a str,
    action: &'a str,
    timestamp: String,
    zone: &'a str,
    query: &'a str,
    video_link: &'a str,
    video_name: &'a str,
    channel_link: &'a str,
    channel_name: &'a str,
    site_name: &'a str,
    site_url: &'a str,
    tool_version: &'a str,
    config_hash: &'a str,
}

#[derive(Serialize)]
struct DocumentCsv<'a> {
    run_id: &'a str,
    document_id: &'a str,
    kind: &'a str,
    path: &'a str,
    records: u64,
    errors: u64,
    tree_truncated: bool,
    tool_version: &'a str,
    config_hash: &'a str,
}

#[derive(Serialize)]
struct RunSummaryCsv<'a> {
    run_id: &'a str,
    documents_processed: u64,
    documents_failed: u64,
    records_extracted: u64,
    record_errors: u64,
    tool_version: &'a str,
    config_hash: &'a str,
}

impl CsvSink {
    pub fn new(
        run_id: &str,
        tool_version: &str,
        config_hash: &str,
        run_output_dir: &Path,
    ) -> Result<Self, MetadataError> {
        let meta_dir = run_output_dir.join("metadata");
        std::fs::create_dir_all(&meta_dir)?;

        let history_file = File::create(meta_dir.join("history.csv"))?;
        let documents_file = File::create(meta_dir.join("documents.csv"))?;
        let run_file = File::create(meta_dir.join("run_summary.csv"))?;

        Ok(Self {
            run_id: run_id.to_string(),
            tool_version: tool_version.to_string(),
            config_hash: config_hash.to_string(),
            history_writer: Mutex::new(csv::Writer::from_writer(history_file)),
            documents_writer: Mutex::new(csv::Writer::from_writer(documents_file)),
            run_writer: Mutex::new(csv::Writer::from_writer(run_file)),
        })
    }
}

impl MetadataSink for CsvSink {
    fn record_history(&self, document_id: &str, record: &HistoryRecord) -> Result<(), MetadataError> {
        let mut row = HistoryCsv {
            run_id: &self.run_id,
            document_id,
            kind: record.kind().as_str(),
            product: &record.product,
            action: &record.action,
            timestamp: record
                .timestamp
                .to_datetime()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            zone: &record.timestamp.zone,
            query: "",
            video_link: "",
            video_name: "",
            channel_link: "",
            channel_name: "",
            site_name: "",
            site_url: "",
            tool_version: &self.tool_version,
            config_hash: &self.config_hash,
        };
        match &record.payload {
            RecordPayload::Search { query } => row.query = query.as_str(),
            RecordPayload::Watch(video) => {
                row.video_link = video.video_link.as_str();
                row.video_name = video.video_name.as_str();
                row.channel_link = video.channel_link.as_str();
                row.channel_name = video.channel_name.as_str();
            }
            RecordPayload::Chrome(site) => {
                row.site_name = site.name.as_str();
                row.site_url = site.url.as_str();
            }
        }
        lock(&self.history_writer)?.serialize(row)?;
        Ok(())
    }

    fn record_document(&self, summary: &DocumentSummary) -> Result<(), MetadataError> {
        let row = DocumentCsv {
            run_id: &summary.run_id,
            document_id: &summary.document_id,
            kind: &summary.kind,
            path: &summary.path,
            records: summary.records,
            errors: summary.errors,
            tree_truncated: summary.tree_truncated,
            tool_version: &self.tool_version,
            config_hash: &self.config_hash,
        };
        lock(&self.documents_writer)?.serialize(row)?;
        Ok(())
    }

    fn record_run_summary(&self, summary: &RunSummary) -> Result<(), MetadataError> {
        let row = RunSummaryCsv {
            run_id: &summary.run_id,
            documents_processed: summary.documents_processed,
            documents_failed: summary.documents_failed,
            records_extracted: summary.records_extracted,
            record_errors: summary.record_errors,
            tool_version: &self.tool_version,
            config_hash: &self.config_hash,
        };
        lock(&self.run_writer)?.serialize(row)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), MetadataError> {
        lock(&self.history_writer)?.flush()?;
        lock(&self.documents_writer)?.flush()?;
        lock(&self.run_writer)?.flush()?;
        Ok(())
    }
}
