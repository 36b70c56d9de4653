use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use crate::metadata::{DocumentSummary, MetadataError, MetadataSink, RunSummary, lock};
use crate::parsers::HistoryRecord;

pub struct JsonlSink {
    run_id: String,
    tool_version: String,
    config_hash: String,
    history_writer: Mutex<BufWriter<File>>,
    documents_writer: Mutex<BufWriter<File>>,
    run_writer: Mutex<BufWriter<File>>,
}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    #[serde(flatten)]
    inner: &'a T,
    tool_version: &'a str,
    config_hash: &'a str,
}

#[derive(Serialize)]
struct HistoryLine<'a> {
    run_id: &'a str,
    document_id: &'a str,
    datetime: Option<chrono::NaiveDateTime>,
    #[serde(flatten)]
    record: &'a HistoryRecord,
}

impl JsonlSink {
    pub fn new(
        run_id: &str,
        tool_version: &str,
        config_hash: &str,
        run_output_dir: &Path,
    ) -> Result<Self, MetadataError> {
        let meta_dir = run_output_dir.join("metadata");
        std::fs::create_dir_all(&meta_dir)?;
        let open = |name: &str| -> Result<Mutex<BufWriter<File>>, MetadataError> {
            Ok(Mutex::new(BufWriter::new(File::create(meta_dir.join(name))?)))
        };
        Ok(Self {
            run_id: run_id.to_string(),
            tool_version: tool_version.to_string(),
            config_hash: config_hash.to_string(),
            history_writer: open("history.jsonl")?,
            documents_writer: open("documents.jsonl")?,
            run_writer: open("run_summary.jsonl")?,
        })
    }

    fn write_line<T: Serialize>(
        &self,
        writer: &Mutex<BufWriter<File>>,
        value: &T,
    ) -> Result<(), MetadataError> {
        let line = Tagged {
            inner: value,
            tool_version: &self.tool_version,
            config_hash: &self.config_hash,
        };
        let mut guard = lock(writer)?;
        serde_json::to_writer(&mut *guard, &line)?;
        guard.write_all(b"\n")?;
        Ok(())
    }
}

impl MetadataSink for JsonlSink {
    fn record_history(&self, document_id: &str, record: &HistoryRecord) -> Result<(), MetadataError> {
        let line = HistoryLine {
            run_id: &self.run_id,
            document_id,
            datetime: record.timestamp.to_datetime(),
            record,
        };
        self.write_line(&self.history_writer, &line)
    }

    fn record_document(&self, summary: &DocumentSummary) -> Result<(), MetadataError> {
        self.write_line(&self.documents_writer, summary)
    }

    fn record_run_summary(&self, summary: &RunSummary) -> Result<(), MetadataError> {
        self.write_line(&self.run_writer, summary)
    }

    fn flush(&self) -> Result<(), MetadataError> {
        lock(&self.history_writer)?.flush()?;
        lock(&self.documents_writer)?.flush()?;
        lock(&self.run_writer)?.flush()?;
        Ok(())
    }
}
