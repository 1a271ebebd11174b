//! # docintel
//!
//! Typed access to document analysis results.
//!
//! A document analysis service returns a large JSON document describing the
//! text, words, lines, selection marks, tables and key-value pairs it found.
//! Different model families lay that document out differently; this library
//! normalizes the layout and answers page-scoped, confidence-filtered queries
//! over it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docintel::{PageFilter, ResultStore};
//!
//! fn main() -> docintel::Result<()> {
//!     let mut store = ResultStore::new();
//!     store.load_file("result.json")?;
//!
//!     println!("{}", store.raw_text()?);
//!     for word in store.words(PageFilter::Page(1), 0.8)? {
//!         println!("{}", word);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two result layouts**: payload wrapped in `analyzeResult` or flattened
//! - **Page filtering**: every query takes a [`PageFilter`]
//! - **Confidence thresholds**: for words, selection marks and field values
//! - **Tables and key-value pairs**: as [`Table`] and ordered [`FieldMap`]s
//! - **`async` feature**: load results through `tokio::fs`

pub mod analyze;
pub mod error;
pub mod model;
pub mod persist;
pub mod query;
pub mod store;

// Re-export commonly used types
pub use analyze::{AnalyzeOptions, Analyzer};
pub use error::{Error, Result};
pub use model::{FieldMap, ResultInfo, Table, TableCell};
pub use persist::{read_document, write_document, JsonFormat};
pub use query::{ModelFamily, PageFilter, ALL_PAGES};
pub use store::{LoadedResult, ResultStore, Shape};

use std::path::Path;

/// Load a persisted analysis result into a new store.
///
/// # Example
///
/// ```no_run
/// use docintel::load_file;
///
/// let store = load_file("result.json").unwrap();
/// println!("Pages: {}", store.max_page_count().unwrap());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ResultStore> {
    let mut store = ResultStore::new();
    store.load_file(path)?;
    Ok(store)
}

/// Extract the raw text from a persisted analysis result.
///
/// # Example
///
/// ```no_run
/// use docintel::extract_text;
///
/// let text = extract_text("result.json").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let store = load_file(path)?;
    store.raw_text().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_file_missing() {
        let result = load_file("tests/data/nonexistent.json");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_extract_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(
            &path,
            r#"{"modelId": "prebuilt-layout", "content": "Hello", "pages": []}"#,
        )
        .unwrap();

        assert_eq!(extract_text(&path).unwrap(), "Hello");
    }

    #[test]
    fn test_extract_text_unsupported_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("read.json");
        fs::write(&path, r#"{"modelId": "prebuilt-read", "content": "Hello"}"#).unwrap();

        assert!(matches!(
            extract_text(&path),
            Err(Error::UnsupportedModel(_))
        ));
    }
}
