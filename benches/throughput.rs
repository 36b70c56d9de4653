use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use takeout_history::html::parse_html;
use takeout_history::parsers::{ClassNames, RecordKind, extract_records};

const CONTAINER: &str = "outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp";
const TITLE: &str = "mdl-typography--title";
const ACTION: &str = "content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1";

fn watch_page(records: usize) -> String {
    let mut html = String::from("<html><head><title>History</title></head><body><div class=\"mdl-grid\">");
    for i in 0..records {
        html.push_str(&format!(
            concat!(
                r#"<div class="{c}"><div class="mdl-grid">"#,
                r#"<div class="header-cell mdl-cell mdl-cell--12-col"><p class="{t}">YouTube<br></p></div>"#,
                r#"<div class="{a}">Watched&nbsp;<a href="https://www.youtube.com/watch?v=v{i}">Video {i}</a><br>"#,
                r#"<a href="https://www.youtube.com/channel/c{i}">Channel {i}</a><br>"#,
                r#"Jan {d}, 2019, {h}:21:12 PM CET</div></div></div>"#
            ),
            c = CONTAINER,
            t = TITLE,
            a = ACTION,
            i = i,
            d = i % 28 + 1,
            h = i % 12 + 1,
        ));
    }
    html.push_str("</div></body></html>");
    html
}

fn bench_extraction(c: &mut Criterion) {
    let classes = ClassNames::default();
    let mut group = c.benchmark_group("watch_history");
    for records in [100usize, 1_000, 10_000] {
        let html = watch_page(records);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_and_extract", records), &html, |b, html| {
            b.iter(|| {
                let outcome = parse_html(html);
                let out = extract_records(outcome.document.root(), RecordKind::Watch, &classes);
                assert_eq!(out.records.len(), records);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
