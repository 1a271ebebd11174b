//! Model families and where each keeps its raw text.

use crate::error::Error;
use crate::store::{LoadedResult, ANALYZE_RESULT_KEY};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A family of analysis models sharing one result layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// `prebuilt-document`: content nested under `analyzeResult`
    Document,
    /// `prebuilt-layout`: content at the top level
    Layout,
}

impl ModelFamily {
    /// All supported families.
    pub const ALL: [ModelFamily; 2] = [ModelFamily::Document, ModelFamily::Layout];

    /// The model id the service uses for this family.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelFamily::Document => "prebuilt-document",
            ModelFamily::Layout => "prebuilt-layout",
        }
    }

    /// Locate the raw text content in a result produced by this family.
    pub(crate) fn content<'a>(&self, result: &'a LoadedResult) -> Option<&'a Value> {
        let document = result.document();
        match self {
            ModelFamily::Document => document.get(ANALYZE_RESULT_KEY)?.get("content"),
            ModelFamily::Layout => document.get("content"),
        }
    }
}

impl FromStr for ModelFamily {
    type Err = Error;

    fn from_str(model_id: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.model_id() == model_id)
            .ok_or_else(|| Error::UnsupportedModel(model_id.to_string()))
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_model_id() {
        assert_eq!(
            "prebuilt-document".parse::<ModelFamily>().unwrap(),
            ModelFamily::Document
        );
        assert_eq!(
            "prebuilt-layout".parse::<ModelFamily>().unwrap(),
            ModelFamily::Layout
        );
        let err = "prebuilt-invoice".parse::<ModelFamily>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel(ref id) if id == "prebuilt-invoice"));
    }

    #[test]
    fn test_display_round_trips() {
        for family in ModelFamily::ALL {
            assert_eq!(family.to_string().parse::<ModelFamily>().unwrap(), family);
        }
    }

    #[test]
    fn test_content_location() {
        let result = LoadedResult::new(json!({
            "content": "top",
            "analyzeResult": { "content": "nested" }
        }));
        assert_eq!(
            ModelFamily::Document.content(&result),
            Some(&json!("nested"))
        );
        assert_eq!(ModelFamily::Layout.content(&result), Some(&json!("top")));
    }
}
