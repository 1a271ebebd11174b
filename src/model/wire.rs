//! Serde views over the sections of a service result.
//!
//! Each collection is decoded on the query that needs it, so a malformed
//! section fails only the queries that read it. Pages are never decoded
//! whole: a query reads the page number of every entry and decodes only the
//! one array it needs from the pages it keeps.

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Decode a result section into its wire type.
pub(crate) fn decode<'a, T: Deserialize<'a>>(field: &str, value: &'a Value) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::malformed(field, e))
}

/// Association between an element and the page it was found on.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BoundingRegion {
    pub page_number: u32,
}

/// Page number of the first bounding region, the one used for filtering.
fn first_page(regions: &[BoundingRegion]) -> Option<u32> {
    regions.first().map(|r| r.page_number)
}

/// Number of a page entry, read from `page` or the service's `pageNumber`.
///
/// Entries without a usable number yield `None` and are skipped everywhere.
pub(crate) fn page_number(page: &Value) -> Option<u32> {
    page.get("page")
        .or_else(|| page.get("pageNumber"))
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Array keys inside a page entry.
pub(crate) const WORDS: &str = "words";
pub(crate) const LINES: &str = "lines";
pub(crate) const SELECTION_MARKS: &str = "selectionMarks";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WordEntry {
    pub content: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LineEntry {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SelectionMarkEntry {
    pub state: String,
    pub confidence: f64,
}

impl SelectionMarkEntry {
    pub fn is_selected(&self) -> bool {
        self.state == "selected"
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableEntry {
    pub row_count: u32,
    pub column_count: u32,
    #[serde(default)]
    pub cells: Vec<CellEntry>,
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl TableEntry {
    pub fn page(&self) -> Option<u32> {
        first_page(&self.bounding_regions)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CellEntry {
    pub row_index: u32,
    pub column_index: u32,
    pub content: String,
    pub kind: Option<String>,
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl CellEntry {
    pub fn page(&self) -> Option<u32> {
        first_page(&self.bounding_regions)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyValueEntry {
    pub key: KeyValueElement,
    pub value: Option<KeyValueElement>,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl KeyValueEntry {
    /// Page of the pair, falling back to the key element's regions.
    pub fn page(&self) -> Option<u32> {
        first_page(&self.bounding_regions).or_else(|| first_page(&self.key.bounding_regions))
    }

    /// Confidence of the value, falling back to the pair's own score.
    pub fn value_confidence(&self) -> f64 {
        self.value
            .as_ref()
            .and_then(|v| v.confidence)
            .or(self.confidence)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyValueElement {
    pub content: String,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}
