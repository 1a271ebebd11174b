//! Interface to the remote document analysis service.
//!
//! The library ships no network client. Callers implement [`Analyzer`] for
//! whatever client they use and hand it to [`ResultStore::analyze`].
//!
//! [`ResultStore::analyze`]: crate::ResultStore::analyze

use crate::error::Result;
use crate::query::ModelFamily;
use serde_json::Value;
use std::path::Path;

/// Default model used for analysis.
pub const DEFAULT_MODEL_ID: &str = "prebuilt-document";

/// Default document locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Options passed to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Model to run (e.g., "prebuilt-layout")
    pub model_id: String,

    /// Locale hint for the document text
    pub locale: String,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model id.
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Use the model of a known family.
    pub fn with_model_family(self, family: ModelFamily) -> Self {
        self.with_model_id(family.model_id())
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// A client for the document analysis service.
///
/// Implementations return the service's result document unchanged; the
/// store takes care of shape normalization.
pub trait Analyzer: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &str {
        "analyzer"
    }

    /// Analyze the file at `input` and return the result document.
    fn analyze(&self, input: &Path, options: &AnalyzeOptions) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_options_defaults() {
        let options = AnalyzeOptions::default();
        assert_eq!(options.model_id, "prebuilt-document");
        assert_eq!(options.locale, "en");
    }

    #[test]
    fn test_analyze_options_builder() {
        let options = AnalyzeOptions::new()
            .with_model_family(ModelFamily::Layout)
            .with_locale("de");
        assert_eq!(options.model_id, "prebuilt-layout");
        assert_eq!(options.locale, "de");
    }
}
