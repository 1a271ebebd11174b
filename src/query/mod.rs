//! Read-only queries over an analysis result.
//!
//! Queries are implemented on [`LoadedResult`] and exposed on
//! [`ResultStore`], where each one first checks that a result is loaded.
//!
//! Only [`LoadedResult::words`] validates the page number against the page
//! count. Selection marks, lines, tables and key-value pairs accept any page
//! and simply return nothing for pages that do not exist.

mod family;
mod page;

pub use family::ModelFamily;
pub use page::{PageFilter, ALL_PAGES};

use crate::error::{Error, Result};
use crate::model::wire::{self, KeyValueEntry, LineEntry, SelectionMarkEntry, TableEntry, WordEntry};
use crate::model::{FieldMap, Table, TableCell};
use crate::store::{LoadedResult, ResultStore};
use serde::Deserialize;
use serde_json::Value;

impl LoadedResult {
    /// Decode a top-level collection, treating a missing one as empty.
    fn section<'a, T: Deserialize<'a>>(&'a self, key: &str) -> Result<Vec<T>> {
        match self.field(key) {
            Some(value) => wire::decode(key, value),
            None => Ok(Vec::new()),
        }
    }

    /// Decode the `key` array of every page matching `page`, in document
    /// order. Other pages and other arrays are left untouched.
    fn page_items<'a, T: Deserialize<'a>>(&'a self, page: PageFilter, key: &str) -> Result<Vec<T>> {
        let Some(pages) = self.field("pages") else {
            return Ok(Vec::new());
        };
        let pages = pages
            .as_array()
            .ok_or_else(|| Error::malformed("pages", "expected an array"))?;

        let mut items = Vec::new();
        for entry in pages {
            let Some(number) = wire::page_number(entry) else {
                log::debug!("Ignoring page entry without a page number");
                continue;
            };
            if !page.matches(number) {
                continue;
            }
            if let Some(section) = entry.get(key).filter(|v| !v.is_null()) {
                let decoded: Vec<T> = wire::decode(&format!("pages.{}", key), section)?;
                items.extend(decoded);
            }
        }
        Ok(items)
    }

    /// Raw text of the document, located according to the model family.
    pub fn raw_text(&self) -> Result<&str> {
        let family: ModelFamily = self.model_id().unwrap_or_default().parse()?;
        family
            .content(self)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Malformed(format!("{} result has no content", family)))
    }

    /// Words on `page` with confidence of at least `min_confidence`.
    ///
    /// Fails with [`Error::PageOutOfRange`] for a specific page outside
    /// `1..=max_page_count`.
    pub fn words(&self, page: PageFilter, min_confidence: f64) -> Result<Vec<String>> {
        page.validate(self.max_page_count())?;

        let words: Vec<WordEntry> = self.page_items(page, wire::WORDS)?;
        Ok(words
            .into_iter()
            .filter(|w| w.confidence >= min_confidence)
            .map(|w| w.content)
            .collect())
    }

    /// Selection marks on `page`, `true` for selected ones.
    pub fn selection_marks(&self, page: PageFilter, min_confidence: f64) -> Result<Vec<bool>> {
        let marks: Vec<SelectionMarkEntry> = self.page_items(page, wire::SELECTION_MARKS)?;
        Ok(marks
            .into_iter()
            .filter(|m| m.confidence >= min_confidence)
            .map(|m| m.is_selected())
            .collect())
    }

    /// Text lines on `page`.
    pub fn lines(&self, page: PageFilter) -> Result<Vec<String>> {
        let lines: Vec<LineEntry> = self.page_items(page, wire::LINES)?;
        Ok(lines.into_iter().map(|l| l.content).collect())
    }

    /// Tables on `page`.
    ///
    /// A table belongs to the page of its first bounding region; its cells
    /// are filtered again by their own first region.
    pub fn tables(&self, page: PageFilter) -> Result<Vec<Table>> {
        let entries: Vec<TableEntry> = self.section("tables")?;

        Ok(entries
            .into_iter()
            .filter(|t| page.matches_region(t.page()))
            .map(|t| {
                let mut table = Table::new(t.row_count, t.column_count);
                for cell in t.cells {
                    if !page.matches_region(cell.page()) {
                        log::debug!(
                            "Dropping cell ({}, {}) found outside page {:?}",
                            cell.row_index,
                            cell.column_index,
                            page
                        );
                        continue;
                    }
                    table.add_cell(
                        TableCell::new(cell.row_index, cell.column_index, cell.content)
                            .with_kind(cell.kind),
                    );
                }
                table
            })
            .collect())
    }

    /// Key-value pairs on `page`. A repeated key keeps the last value.
    pub fn key_value_pairs(&self, page: PageFilter) -> Result<FieldMap> {
        let entries: Vec<KeyValueEntry> = self.section("keyValuePairs")?;

        let mut fields = FieldMap::new();
        for entry in entries {
            if !page.matches_region(entry.page()) {
                continue;
            }
            match entry.value {
                Some(value) => {
                    fields.insert(entry.key.content, value.content);
                }
                None => log::debug!("Key {:?} has no value", entry.key.content),
            }
        }
        Ok(fields)
    }

    /// Values of the named keys across all pages, keeping only values with
    /// confidence of at least `min_value_confidence`.
    ///
    /// Keys are matched by exact text equality.
    pub fn specific_fields<S: AsRef<str>>(
        &self,
        field_names: &[S],
        min_value_confidence: f64,
    ) -> Result<FieldMap> {
        let entries: Vec<KeyValueEntry> = self.section("keyValuePairs")?;

        let mut fields = FieldMap::new();
        for entry in entries {
            if !field_names.iter().any(|n| n.as_ref() == entry.key.content) {
                continue;
            }
            let confidence = entry.value_confidence();
            if confidence < min_value_confidence {
                continue;
            }
            if let Some(value) = entry.value {
                fields.insert(entry.key.content, value.content);
            }
        }
        Ok(fields)
    }
}

impl ResultStore {
    /// See [`LoadedResult::raw_text`].
    pub fn raw_text(&self) -> Result<&str> {
        self.loaded()?.raw_text()
    }

    /// See [`LoadedResult::words`].
    pub fn words(&self, page: PageFilter, min_confidence: f64) -> Result<Vec<String>> {
        self.loaded()?.words(page, min_confidence)
    }

    /// See [`LoadedResult::selection_marks`].
    pub fn selection_marks(&self, page: PageFilter, min_confidence: f64) -> Result<Vec<bool>> {
        self.loaded()?.selection_marks(page, min_confidence)
    }

    /// See [`LoadedResult::lines`].
    pub fn lines(&self, page: PageFilter) -> Result<Vec<String>> {
        self.loaded()?.lines(page)
    }

    /// See [`LoadedResult::tables`].
    pub fn tables(&self, page: PageFilter) -> Result<Vec<Table>> {
        self.loaded()?.tables(page)
    }

    /// See [`LoadedResult::key_value_pairs`].
    pub fn key_value_pairs(&self, page: PageFilter) -> Result<FieldMap> {
        self.loaded()?.key_value_pairs(page)
    }

    /// See [`LoadedResult::specific_fields`].
    pub fn specific_fields<S: AsRef<str>>(
        &self,
        field_names: &[S],
        min_value_confidence: f64,
    ) -> Result<FieldMap> {
        self.loaded()?.specific_fields(field_names, min_value_confidence)
    }
}
