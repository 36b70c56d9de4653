mod common;

use takeout_history::metadata::MetadataBackendKind;

use common::{chrome_visit, default_config, page, read_jsonl, run, search, watch, write_document};

#[test]
fn full_export_to_jsonl() {
    let export = tempfile::tempdir().expect("export dir");
    let output = tempfile::tempdir().expect("output dir");
    let (cfg, config_hash) = default_config("integration");

    write_document(
        export.path(),
        &cfg,
        "youtube_search",
        &page(&[
            search("rust", "Jan 11, 2015, 11:21:12 PM EDT"),
            search("tokio", "Jan 10, 2015, 9:00:01 AM EDT"),
        ]),
    );
    write_document(
        export.path(),
        &cfg,
        "youtube_watch",
        &page(&[watch("abc", "chan", "Feb 2, 2019, 12:30:00 PM CET")]),
    );
    write_document(
        export.path(),
        &cfg,
        "google_search",
        &page(&[search("weather", "Mar 3, 2020, 12:05:00 AM PST")]),
    );
    write_document(
        export.path(),
        &cfg,
        "chrome",
        &page(&[chrome_visit("Docs", "https://docs.rs/", "Dec 31, 2021, 11:59:59 PM UTC")]),
    );

    let (summary, meta) = run(
        &cfg,
        &config_hash,
        export.path(),
        output.path(),
        MetadataBackendKind::Jsonl,
    );
    assert_eq!(summary.documents_processed, 4);
    assert_eq!(summary.documents_failed, 0);
    assert_eq!(summary.records_extracted, 5);
    assert_eq!(summary.record_errors, 0);

    let history = read_jsonl(&meta.join("history.jsonl"));
    assert_eq!(history.len(), 5);

    let first = &history[0];
    assert_eq!(first["document_id"], "youtube_search");
    assert_eq!(first["kind"], "search");
    assert_eq!(first["query"], "rust");
    assert_eq!(first["action"], "Searched for");
    assert_eq!(first["timestamp"]["hour"], 23);
    assert_eq!(first["timestamp"]["zone"], "EDT");
    assert_eq!(first["run_id"], "integration");
    assert_eq!(first["config_hash"], config_hash.as_str());
    assert_eq!(history[1]["query"], "tokio");

    let watched = &history[2];
    assert_eq!(watched["kind"], "watch");
    assert_eq!(watched["video_name"], "abc");
    assert_eq!(watched["channel_name"], "chan");
    assert_eq!(watched["channel_link"], "https://www.youtube.com/channel/chan");
    assert_eq!(watched["timestamp"]["hour"], 12);

    assert_eq!(history[3]["timestamp"]["hour"], 0);

    let visit = &history[4];
    assert_eq!(visit["kind"], "chrome");
    assert_eq!(visit["product"], "Chrome");
    assert_eq!(visit["name"], "Docs");
    assert_eq!(visit["url"], "https://docs.rs/");

    let documents = read_jsonl(&meta.join("documents.jsonl"));
    assert_eq!(documents.len(), 4);
    assert_eq!(documents[0]["records"], 2);
    assert_eq!(documents[0]["tree_truncated"], false);

    let runs = read_jsonl(&meta.join("run_summary.jsonl"));
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["records_extracted"], 5);
}

#[test]
fn csv_backend_writes_history_rows() {
    let export = tempfile::tempdir().expect("export dir");
    let output = tempfile::tempdir().expect("output dir");
    let (mut cfg, config_hash) = default_config("csv_run");
    cfg.documents.retain(|d| d.id == "youtube_watch");

    write_document(
        export.path(),
        &cfg,
        "youtube_watch",
        &page(&[
            watch("v1", "c1", "Jan 1, 2018, 1:00:00 AM UTC"),
            watch("v2", "c2", "Jan 2, 2018, 2:00:00 PM UTC"),
        ]),
    );

    let (summary, meta) = run(
        &cfg,
        &config_hash,
        export.path(),
        output.path(),
        MetadataBackendKind::Csv,
    );
    assert_eq!(summary.records_extracted, 2);

    let mut reader = csv::Reader::from_path(meta.join("history.csv")).expect("reader");
    let headers = reader.headers().expect("headers").clone();
    let name_idx = headers.iter().position(|h| h == "video_name").expect("column");
    let ts_idx = headers.iter().position(|h| h == "timestamp").expect("column");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][name_idx], "v1");
    assert_eq!(&rows[1][name_idx], "v2");
    assert_eq!(&rows[1][ts_idx], "2018-01-02 14:00:00");

    assert!(meta.join("documents.csv").exists());
    assert!(meta.join("run_summary.csv").exists());
}
