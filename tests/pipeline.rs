// tests/pipeline.rs
//
// Aggregation pipeline with an in-memory extractor; no network.
//
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use catalog_scrape::config::options::{AppOptions, ExportFormat, ScrapeOptions};
use catalog_scrape::core::SuffixSource;
use catalog_scrape::error::{ExtractError, FetchError};
use catalog_scrape::progress::Progress;
use catalog_scrape::scrape::collect_products;
use catalog_scrape::specs::ProductExtractor;
use catalog_scrape::{Attribute, ProductRecord, RunError, SourceError, run_with};

/// Canned pages keyed by url. `None` = fetch failure; unknown url = not a product.
struct FakeExtractor {
    pages: HashMap<String, Option<(String, Vec<Attribute>)>>,
    delay_ms: fn(&str) -> u64,
}

impl FakeExtractor {
    fn new() -> Self {
        Self { pages: HashMap::new(), delay_ms: |_| 0 }
    }

    fn page(mut self, url: &str, name: &str, attrs: &[(&str, &str)]) -> Self {
        let attrs = attrs.iter().map(|(n, v)| Attribute::new(*n, *v)).collect();
        self.pages.insert(url.to_string(), Some((name.to_string(), attrs)));
        self
    }

    fn down(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), None);
        self
    }

    fn with_delay(mut self, delay_ms: fn(&str) -> u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl ProductExtractor for FakeExtractor {
    fn extract(&self, url: &str) -> Result<ProductRecord, SourceError> {
        thread::sleep(Duration::from_millis((self.delay_ms)(url)));
        match self.pages.get(url) {
            Some(Some((name, attrs))) => {
                let mut p = ProductRecord::new(url);
                p.name = name.clone();
                p.attributes = attrs.clone();
                Ok(p)
            }
            Some(None) => Err(FetchError::Status { url: url.into(), status: 503 }.into()),
            None => Err(ExtractError::Incomplete.into()),
        }
    }
}

struct Fixed;
impl SuffixSource for Fixed {
    fn suffix(&self, len: usize) -> String {
        "x".repeat(len)
    }
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<usize>,
    failed: Vec<usize>,
    finished: bool,
    lines: Vec<String>,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn item_done(&mut self, index: usize, _name: &str) { self.done.push(index); }
    fn item_failed(&mut self, index: usize, _url: &str, _reason: &str) { self.failed.push(index); }
    fn finish(&mut self) { self.finished = true; }
}

fn quick(workers: usize) -> ScrapeOptions {
    ScrapeOptions { workers, request_pause_ms: 0, jitter_ms: 0, ..ScrapeOptions::default() }
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn app_in(dir: &Path, sources: &str) -> AppOptions {
    let source_file = dir.join("source.txt");
    fs::write(&source_file, sources).unwrap();
    let mut opts = AppOptions::default();
    opts.scrape = ScrapeOptions { source_file, ..quick(2) };
    opts.export.format = ExportFormat::Csv;
    opts.export.out_dir = dir.to_path_buf();
    opts
}

#[test]
fn skips_failures_and_keeps_source_order() {
    let fake = FakeExtractor::new()
        .page("u1", "One", &[("Color", "Red")])
        .down("u2")
        .page("u3", "", &[])
        .page("u4", "Four", &[]);
    let sources = urls(&["u1", "u2", "u3", "u4", "u5"]);
    let mut rec = Recorder::default();

    let out = collect_products(&sources, &fake, &quick(1), Some(&mut rec));

    let names: Vec<&str> = out.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Four"]);
    let skipped: Vec<usize> = out.skipped.iter().map(|s| s.index).collect();
    assert_eq!(skipped, vec![1, 2, 4]);
    assert!(out.skipped[0].reason.contains("503"));

    assert_eq!(rec.total, 5);
    assert_eq!(rec.done, vec![0, 3]);
    assert_eq!(rec.failed, vec![1, 2, 4]);
    assert!(rec.finished);
}

#[test]
fn parallel_workers_restore_source_order() {
    let list: Vec<String> = (0..24).map(|i| format!("p{i}")).collect();
    // Early sources finish last.
    let fake = list
        .iter()
        .fold(FakeExtractor::new(), |f, u| f.page(u, &format!("Name {u}"), &[]))
        .with_delay(|url| {
            let i: u64 = url[1..].parse().unwrap();
            (24 - i) * 3
        });

    let order = Mutex::new(Vec::new());
    struct Completion<'a>(&'a Mutex<Vec<usize>>);
    impl Progress for Completion<'_> {
        fn item_done(&mut self, index: usize, _name: &str) { self.0.lock().unwrap().push(index); }
    }
    let mut progress = Completion(&order);

    let out = collect_products(&list, &fake, &quick(6), Some(&mut progress));

    let got: Vec<&str> = out.products.iter().map(|p| p.source_url.as_str()).collect();
    let want: Vec<&str> = list.iter().map(String::as_str).collect();
    assert_eq!(got, want);
    assert_eq!(order.lock().unwrap().len(), 24);
}

#[test]
fn empty_source_list_collects_nothing() {
    let fake = FakeExtractor::new();
    let out = collect_products(&[], &fake, &quick(4), None);
    assert!(out.products.is_empty());
    assert!(out.skipped.is_empty());
}

#[test]
fn run_exports_retained_rows_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let opts = app_in(dir.path(), "u1\n\n  u2  \nu3\n");
    let fake = FakeExtractor::new()
        .page("u1", "One", &[("Color", "Red"), ("Weight", "1kg")])
        .down("u2")
        .page("u3", "Three", &[("Color", "Blue")]);

    let summary = run_with(&opts, &fake, &Fixed, None).unwrap();

    assert_eq!(summary.sources, 3);
    assert_eq!(summary.retained, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].url, "u2");
    assert_eq!(summary.attribute_columns, 2);

    let path = summary.artifact.unwrap();
    assert_eq!(path, dir.path().join("products_xxxxx.csv"));
    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("u1,One,"));
    assert!(lines[1].ends_with(",Red,1kg"));
    assert!(lines[2].starts_with("u3,Three,"));
    assert!(lines[2].ends_with(",Blue,"));
}

#[test]
fn run_without_products_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let opts = app_in(dir.path(), "u1\nu2\n");
    let fake = FakeExtractor::new().down("u1");
    let mut rec = Recorder::default();

    let summary = run_with(&opts, &fake, &Fixed, Some(&mut rec)).unwrap();

    assert!(summary.artifact.is_none());
    assert_eq!(summary.retained, 0);
    assert_eq!(summary.skipped.len(), 2);
    assert!(rec.lines.iter().any(|l| l.contains("No product data")));
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1); // just source.txt
}

#[test]
fn run_with_blank_source_list_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let opts = app_in(dir.path(), "\n   \n");
    let summary = run_with(&opts, &FakeExtractor::new(), &Fixed, None).unwrap();
    assert_eq!(summary.sources, 0);
    assert!(summary.artifact.is_none());
}

#[test]
fn missing_source_list_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = AppOptions::default();
    opts.scrape.source_file = dir.path().join("nope.txt");

    let err = run_with(&opts, &FakeExtractor::new(), &Fixed, None).unwrap_err();
    assert!(matches!(err, RunError::SourceList(_)));
}

#[test]
fn run_reports_progress_through_collection_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let opts = app_in(dir.path(), "u1\nu2\n");
    let fake = FakeExtractor::new().page("u1", "One", &[("Color", "Red")]).down("u2");
    let mut rec = Recorder::default();

    let summary = run_with(&opts, &fake, &Fixed, Some(&mut rec)).unwrap();

    assert_eq!(rec.total, 2);
    assert_eq!(rec.done, vec![0]);
    assert_eq!(rec.failed, vec![1]);
    assert!(rec.finished);
    assert!(rec.lines[0].contains("Got 2 source links"));
    let path = summary.artifact.unwrap();
    assert!(rec.lines.last().unwrap().contains(&path.display().to_string()));
}
