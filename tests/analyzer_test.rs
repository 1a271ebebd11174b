//! Integration tests for running an analyzer through the result store.

use docintel::error::Result;
use docintel::{AnalyzeOptions, Analyzer, Error, ModelFamily, PageFilter, ResultStore};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Mutex;

/// Mock analyzer returning a canned layout result.
struct MockAnalyzer {
    calls: Mutex<Vec<(String, String)>>,
}

impl MockAnalyzer {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Analyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    fn analyze(&self, _input: &Path, options: &AnalyzeOptions) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((options.model_id.clone(), options.locale.clone()));
        Ok(json!({
            "modelId": options.model_id,
            "content": "Invoice 42",
            "pages": [
                { "page": 1, "words": [
                    { "content": "Invoice", "confidence": 0.98 },
                    { "content": "42", "confidence": 0.75 }
                ] }
            ]
        }))
    }
}

/// Analyzer that always fails.
struct FailingAnalyzer;

impl Analyzer for FailingAnalyzer {
    fn analyze(&self, _input: &Path, _options: &AnalyzeOptions) -> Result<Value> {
        Err(Error::Analysis("service unavailable".into()))
    }
}

fn input_file() -> tempfile::NamedTempFile {
    tempfile::NamedTempFile::new().unwrap()
}

#[test]
fn test_analyze_loads_result() {
    let input = input_file();
    let analyzer = MockAnalyzer::new();
    let options = AnalyzeOptions::new()
        .with_model_family(ModelFamily::Layout)
        .with_locale("en-US");

    let mut store = ResultStore::new();
    store.analyze(&analyzer, input.path(), &options).unwrap();

    assert_eq!(store.raw_text().unwrap(), "Invoice 42");
    assert_eq!(
        store.words(PageFilter::Page(1), 0.9).unwrap(),
        ["Invoice"]
    );
    assert_eq!(
        *analyzer.calls.lock().unwrap(),
        [("prebuilt-layout".to_string(), "en-US".to_string())]
    );
}

#[test]
fn test_analyze_missing_input() {
    let analyzer = MockAnalyzer::new();
    let mut store = ResultStore::new();

    let result = store.analyze(
        &analyzer,
        Path::new("does/not/exist.pdf"),
        &AnalyzeOptions::default(),
    );
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(analyzer.calls.lock().unwrap().is_empty());
    assert!(!store.is_loaded());
}

#[test]
fn test_analyze_failure_keeps_previous_result() {
    let input = input_file();
    let mut store = ResultStore::from_document(json!({
        "modelId": "prebuilt-layout",
        "content": "previous"
    }));

    let result = store.analyze(&FailingAnalyzer, input.path(), &AnalyzeOptions::default());
    assert!(matches!(result, Err(Error::Analysis(_))));
    assert_eq!(store.raw_text().unwrap(), "previous");
}

#[test]
fn test_analyze_through_trait_object() {
    let input = input_file();
    let analyzer: Box<dyn Analyzer> = Box::new(MockAnalyzer::new());

    let mut store = ResultStore::new();
    store
        .analyze(analyzer.as_ref(), input.path(), &AnalyzeOptions::default())
        .unwrap();

    // The default model is prebuilt-document, whose text lives under
    // analyzeResult; the mock returns a flattened result.
    assert!(matches!(store.raw_text(), Err(Error::Malformed(_))));
    assert_eq!(store.max_page_count().unwrap(), 1);
}

#[test]
fn test_snapshot_shared_across_threads() {
    let input = input_file();
    let mut store = ResultStore::new();
    store
        .analyze(&MockAnalyzer::new(), input.path(), &AnalyzeOptions::default())
        .unwrap();

    let snapshot = store.snapshot().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let snapshot = snapshot.clone();
            std::thread::spawn(move || snapshot.words(PageFilter::All, 0.0).unwrap().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
