//! Shared fixtures for extraction tests.
//!
//! Builds activity-log HTML in the layout the exports use and lays it out
//! under a temporary export root at the paths the default config expects.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use takeout_history::config::{self, Config};
use takeout_history::metadata::{self, MetadataBackendKind, RunSummary};
use takeout_history::takeout;

pub const CONTAINER_CLASS: &str = "outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp";
pub const TITLE_CLASS: &str = "mdl-typography--title";
pub const ACTION_CLASS: &str = "content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1";

// ============================================================================
// HTML Builders
// ============================================================================

pub fn record(title: &str, action_html: &str) -> String {
    format!(
        concat!(
            r#"<div class="{container}"><div class="mdl-grid">"#,
            r#"<div class="header-cell mdl-cell mdl-cell--12-col"><p class="{title_class}">{title}<br></p></div>"#,
            r#"<div class="{action_class}">{action}</div>"#,
            r#"<div class="content-cell mdl-cell mdl-cell--12-col mdl-typography--caption"><b>Products:</b><br>&emsp;{title}<br></div>"#,
            r#"</div></div>"#
        ),
        container = CONTAINER_CLASS,
        title_class = TITLE_CLASS,
        action_class = ACTION_CLASS,
        title = title,
        action = action_html,
    )
}

pub fn search(query: &str, when: &str) -> String {
    record(
        "YouTube",
        &format!(
            r#"Searched for&nbsp;<a href="https://www.youtube.com/results?search_query={query}">{query}</a><br>{when}"#
        ),
    )
}

pub fn watch(video: &str, channel: &str, when: &str) -> String {
    record(
        "YouTube",
        &format!(
            concat!(
                r#"Watched&nbsp;<a href="https://www.youtube.com/watch?v={video}">{video}</a><br>"#,
                r#"<a href="https://www.youtube.com/channel/{channel}">{channel}</a><br>{when}"#
            ),
            video = video,
            channel = channel,
            when = when,
        ),
    )
}

pub fn chrome_visit(name: &str, url: &str, when: &str) -> String {
    record(
        "Chrome",
        &format!(r#"Visited&nbsp;<a href="{url}">{name}</a><br>{when}"#),
    )
}

pub fn page(records: &[String]) -> String {
    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>My Activity</title>",
            "<style>.mdl-grid {{ display: flex; }}</style></head>",
            "<body><div class=\"mdl-grid\">{}</div></body></html>"
        ),
        records.concat()
    )
}

// ============================================================================
// Export Layout
// ============================================================================

pub fn write_document(export_root: &Path, cfg: &Config, id: &str, html: &str) -> PathBuf {
    let doc = cfg
        .documents
        .iter()
        .find(|d| d.id == id)
        .expect("document id in config");
    let path = export_root.join(&doc.path);
    fs::create_dir_all(path.parent().expect("parent")).expect("create export dirs");
    fs::write(&path, html).expect("write document");
    path
}

pub fn default_config(run_id: &str) -> (Config, String) {
    let loaded = config::load_config(None).expect("config");
    let mut cfg = loaded.config;
    cfg.run_id = run_id.to_string();
    (cfg, loaded.config_hash)
}

/// Run extraction into `output_root/<run_id>` with a real sink.
pub fn run(
    cfg: &Config,
    config_hash: &str,
    export_root: &Path,
    output_root: &Path,
    backend: MetadataBackendKind,
) -> (RunSummary, PathBuf) {
    let run_output_dir = output_root.join(&cfg.run_id);
    fs::create_dir_all(&run_output_dir).expect("output dir");
    let sink = metadata::build_sink(
        backend,
        &cfg.run_id,
        env!("CARGO_PKG_VERSION"),
        config_hash,
        &run_output_dir,
    )
    .expect("metadata sink");
    let summary = takeout::run_extraction(cfg, export_root, sink.as_ref()).expect("run");
    (summary, run_output_dir.join("metadata"))
}

pub fn read_jsonl(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).expect("jsonl read");
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("json"))
        .collect()
}
