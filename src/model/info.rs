//! Summary information about a loaded result.

use crate::store::{LoadedResult, Shape};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summary of a loaded analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultInfo {
    /// Top-level layout of the source document
    pub shape: Shape,

    /// Model that produced the result (e.g., "prebuilt-layout")
    pub model_id: Option<String>,

    /// Service API version
    pub api_version: Option<String>,

    /// When the analysis was started
    pub created: Option<DateTime<Utc>>,

    /// Highest page number in the result
    pub max_page_count: u32,

    /// Number of page entries
    pub page_count: usize,

    /// Number of tables
    pub table_count: usize,

    /// Number of key-value pairs
    pub key_value_pair_count: usize,
}

impl ResultInfo {
    pub(crate) fn collect(result: &LoadedResult) -> Self {
        let count = |key: &str| {
            result
                .field(key)
                .and_then(Value::as_array)
                .map_or(0, Vec::len)
        };
        let text = |key: &str| {
            result
                .envelope_field(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            shape: result.shape(),
            model_id: text("modelId"),
            api_version: text("apiVersion"),
            created: text("createdDateTime").and_then(|s| parse_timestamp(&s)),
            max_page_count: result.max_page_count(),
            page_count: count("pages"),
            table_count: count("tables"),
            key_value_pair_count: count("keyValuePairs"),
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparsable createdDateTime {:?}: {}", value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_collect_wrapped() {
        let result = LoadedResult::new(json!({
            "status": "succeeded",
            "createdDateTime": "2024-03-01T10:15:30Z",
            "analyzeResult": {
                "apiVersion": "2023-07-31",
                "modelId": "prebuilt-document",
                "pages": [{ "page": 1 }, { "page": 2 }],
                "tables": [],
                "keyValuePairs": [{ "key": { "content": "a" } }]
            }
        }));

        let info = ResultInfo::collect(&result);
        assert_eq!(info.shape, Shape::Wrapped);
        assert_eq!(info.model_id.as_deref(), Some("prebuilt-document"));
        assert_eq!(info.api_version.as_deref(), Some("2023-07-31"));
        assert_eq!(info.max_page_count, 2);
        assert_eq!(info.page_count, 2);
        assert_eq!(info.table_count, 0);
        assert_eq!(info.key_value_pair_count, 1);

        let created = info.created.unwrap();
        assert_eq!(created.year(), 2024);
        assert_eq!(created.hour(), 10);
    }

    #[test]
    fn test_collect_bad_timestamp() {
        let result = LoadedResult::new(json!({
            "modelId": "prebuilt-layout",
            "createdDateTime": "yesterday"
        }));
        let info = ResultInfo::collect(&result);
        assert_eq!(info.shape, Shape::Flattened);
        assert!(info.created.is_none());
        assert_eq!(info.max_page_count, 1);
        assert_eq!(info.page_count, 0);
    }
}
