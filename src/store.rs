//! Holder for the current analysis result.
//!
//! A [`ResultStore`] is either empty or holds one [`LoadedResult`]. Loading
//! builds a complete `LoadedResult` (document, shape and page count) before
//! swapping it in, so a failed load leaves the previous result in place and
//! readers never see a document paired with another document's page count.

use crate::analyze::{AnalyzeOptions, Analyzer};
use crate::error::{Error, Result};
use crate::model::{wire, ResultInfo};
use crate::persist::{self, JsonFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Key of the wrapper object used by some model families.
pub const ANALYZE_RESULT_KEY: &str = "analyzeResult";

/// Top-level layout of an analysis result document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Payload nested under `analyzeResult`
    Wrapped,
    /// Payload keys at the top level (e.g. `prebuilt-layout`)
    Flattened,
}

impl Shape {
    /// Detect the shape of a document.
    pub fn of(document: &Value) -> Self {
        if document.get(ANALYZE_RESULT_KEY).is_some() {
            Shape::Wrapped
        } else {
            Shape::Flattened
        }
    }
}

/// An analysis result together with the values derived from it at load time.
#[derive(Debug, Clone)]
pub struct LoadedResult {
    document: Value,
    shape: Shape,
    max_page_count: u32,
}

impl LoadedResult {
    /// Wrap a parsed document. The document is not validated here.
    pub fn new(document: Value) -> Self {
        let shape = Shape::of(&document);
        let mut result = Self {
            document,
            shape,
            max_page_count: 1,
        };
        result.max_page_count = result.compute_max_page_count();
        result
    }

    /// The document as loaded.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Shape detected when the document was loaded.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Highest page number in the result, 1 if it has no pages.
    pub fn max_page_count(&self) -> u32 {
        self.max_page_count
    }

    /// Look up a payload field, inside `analyzeResult` for wrapped documents
    /// and at the top level otherwise. JSON `null` counts as absent.
    pub fn field(&self, key: &str) -> Option<&Value> {
        let container = match self.shape {
            Shape::Wrapped => self.document.get(ANALYZE_RESULT_KEY)?,
            Shape::Flattened => &self.document,
        };
        container.get(key).filter(|v| !v.is_null())
    }

    /// Look up an envelope field such as `modelId`, trying the top level
    /// first and then the `analyzeResult` wrapper.
    pub(crate) fn envelope_field(&self, key: &str) -> Option<&Value> {
        self.document
            .get(key)
            .or_else(|| self.document.get(ANALYZE_RESULT_KEY)?.get(key))
            .filter(|v| !v.is_null())
    }

    /// Id of the model that produced the result.
    pub fn model_id(&self) -> Option<&str> {
        self.envelope_field("modelId").and_then(Value::as_str)
    }

    /// Summary of this result.
    pub fn info(&self) -> ResultInfo {
        ResultInfo::collect(self)
    }

    fn compute_max_page_count(&self) -> u32 {
        let Some(pages) = self.field("pages").and_then(Value::as_array) else {
            return 1;
        };

        let numbers = pages.iter().filter_map(|page| {
            let number = wire::page_number(page);
            if number.is_none() {
                log::warn!("Skipping page entry without a page number");
            }
            number
        });

        numbers.max().unwrap_or(1)
    }
}

/// Holds at most one analysis result and answers queries over it.
///
/// Every query fails with [`Error::NoResult`] until a result is loaded.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    current: Option<Arc<LoadedResult>>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given document.
    pub fn from_document(document: Value) -> Self {
        let mut store = Self::new();
        store.load(document);
        store
    }

    /// Check whether a result is loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the held result with an already-parsed document.
    pub fn load(&mut self, document: Value) {
        let result = LoadedResult::new(document);
        log::debug!(
            "Loaded {:?} result (model {:?}, {} page(s))",
            result.shape(),
            result.model_id(),
            result.max_page_count()
        );
        self.current = Some(Arc::new(result));
    }

    /// Load a persisted result from a JSON file.
    ///
    /// Fails with [`Error::NotFound`] if the file does not exist. On any
    /// failure the previously loaded result is kept.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let document = persist::read_document(path)?;
        self.load(document);
        Ok(())
    }

    /// Load a persisted result from a JSON file without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn load_file_async<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let document = persist::read_document_async(path).await?;
        self.load(document);
        Ok(())
    }

    /// Run the analysis service on `input` and load what it returns.
    pub fn analyze<A: Analyzer + ?Sized>(
        &mut self,
        analyzer: &A,
        input: &Path,
        options: &AnalyzeOptions,
    ) -> Result<()> {
        if !input.exists() {
            return Err(Error::NotFound(input.to_path_buf()));
        }
        log::debug!(
            "Analyzing {} with {} (model {}, locale {})",
            input.display(),
            analyzer.name(),
            options.model_id,
            options.locale
        );
        let document = analyzer.analyze(input, options)?;
        self.load(document);
        Ok(())
    }

    /// Write the held result to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        persist::write_document(path, self.loaded()?.document(), format)
    }

    /// The held result, or [`Error::NoResult`].
    ///
    /// All queries go through this check before touching the document.
    pub fn loaded(&self) -> Result<&LoadedResult> {
        self.current.as_deref().ok_or(Error::NoResult)
    }

    /// A shared handle to the held result for readers on other threads.
    pub fn snapshot(&self) -> Option<Arc<LoadedResult>> {
        self.current.clone()
    }

    /// Look up a payload field of the held result.
    pub fn field(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.loaded()?.field(key))
    }

    /// Highest page number in the held result.
    pub fn max_page_count(&self) -> Result<u32> {
        Ok(self.loaded()?.max_page_count())
    }

    /// Summary of the held result.
    pub fn info(&self) -> Result<ResultInfo> {
        Ok(self.loaded()?.info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_detection() {
        assert_eq!(Shape::of(&json!({ "analyzeResult": {} })), Shape::Wrapped);
        assert_eq!(Shape::of(&json!({ "content": "x" })), Shape::Flattened);
    }

    #[test]
    fn test_field_prefers_wrapper() {
        let result = LoadedResult::new(json!({
            "content": "outer",
            "analyzeResult": { "content": "inner" }
        }));
        assert_eq!(result.field("content"), Some(&json!("inner")));
    }

    #[test]
    fn test_field_does_not_fall_back_to_top_level_when_wrapped() {
        let result = LoadedResult::new(json!({
            "tables": [],
            "analyzeResult": { "content": "inner" }
        }));
        assert!(result.field("tables").is_none());
    }

    #[test]
    fn test_field_flattened_and_null() {
        let result = LoadedResult::new(json!({ "content": "flat", "tables": null }));
        assert_eq!(result.field("content"), Some(&json!("flat")));
        assert!(result.field("tables").is_none());
        assert!(result.field("missing").is_none());
    }

    #[test]
    fn test_max_page_count() {
        let result = LoadedResult::new(json!({
            "pages": [{ "page": 2 }, { "page": 5 }, { "page": 3 }]
        }));
        assert_eq!(result.max_page_count(), 5);

        let result = LoadedResult::new(json!({ "analyzeResult": { "pages": [] } }));
        assert_eq!(result.max_page_count(), 1);

        let result = LoadedResult::new(json!({ "content": "" }));
        assert_eq!(result.max_page_count(), 1);
    }

    #[test]
    fn test_max_page_count_accepts_page_number() {
        let result = LoadedResult::new(json!({
            "analyzeResult": { "pages": [{ "pageNumber": 4 }, { "words": [] }] }
        }));
        assert_eq!(result.max_page_count(), 4);
    }

    #[test]
    fn test_model_id_lookup() {
        let result = LoadedResult::new(json!({ "analyzeResult": { "modelId": "prebuilt-read" } }));
        assert_eq!(result.model_id(), Some("prebuilt-read"));

        let result = LoadedResult::new(json!({
            "modelId": "prebuilt-document",
            "analyzeResult": { "modelId": "ignored" }
        }));
        assert_eq!(result.model_id(), Some("prebuilt-document"));
    }

    #[test]
    fn test_empty_store_guard() {
        let store = ResultStore::new();
        assert!(!store.is_loaded());
        assert!(matches!(store.loaded(), Err(Error::NoResult)));
        assert!(matches!(store.field("pages"), Err(Error::NoResult)));
        assert!(matches!(store.max_page_count(), Err(Error::NoResult)));
        assert!(matches!(store.info(), Err(Error::NoResult)));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_load_replaces_result() {
        let mut store = ResultStore::from_document(json!({ "pages": [{ "page": 7 }] }));
        assert_eq!(store.max_page_count().unwrap(), 7);

        store.load(json!({ "pages": [{ "page": 2 }] }));
        assert_eq!(store.max_page_count().unwrap(), 2);
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let mut store = ResultStore::from_document(json!({ "pages": [{ "page": 3 }] }));
        let snapshot = store.snapshot().unwrap();

        store.load(json!({ "pages": [{ "page": 9 }] }));
        assert_eq!(snapshot.max_page_count(), 3);
        assert_eq!(store.max_page_count().unwrap(), 9);
    }

    #[test]
    fn test_save_requires_result() {
        let store = ResultStore::new();
        let result = store.save("unused.json", JsonFormat::Pretty);
        assert!(matches!(result, Err(Error::NoResult)));
    }
}
