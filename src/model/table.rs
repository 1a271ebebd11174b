//! Table types.

use serde::{Deserialize, Serialize};

/// A table recognized by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Number of rows reported by the service
    pub row_count: u32,

    /// Number of columns reported by the service
    pub column_count: u32,

    /// Cells in document order
    pub cells: Vec<TableCell>,
}

impl Table {
    /// Create a new table with no cells.
    pub fn new(row_count: u32, column_count: u32) -> Self {
        Self {
            row_count,
            column_count,
            cells: Vec::new(),
        }
    }

    /// Add a cell to the table.
    pub fn add_cell(&mut self, cell: TableCell) {
        self.cells.push(cell);
    }

    /// Cells in the given row, in document order.
    pub fn row(&self, row_index: u32) -> Vec<&TableCell> {
        self.cells
            .iter()
            .filter(|c| c.row_index == row_index)
            .collect()
    }

    /// Cells in the given column, in document order.
    pub fn column(&self, column_index: u32) -> Vec<&TableCell> {
        self.cells
            .iter()
            .filter(|c| c.column_index == column_index)
            .collect()
    }

    /// Cell at the given position, if present.
    pub fn cell(&self, row_index: u32, column_index: u32) -> Option<&TableCell> {
        self.cells
            .iter()
            .find(|c| c.row_index == row_index && c.column_index == column_index)
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get plain text representation: rows on separate lines, cells tab-separated.
    pub fn plain_text(&self) -> String {
        (0..self.row_count)
            .map(|r| {
                (0..self.column_count)
                    .map(|c| self.cell(r, c).map(|cell| cell.text.as_str()).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Row index (0-indexed)
    pub row_index: u32,

    /// Column index (0-indexed)
    pub column_index: u32,

    /// Whether the source entry carried a `kind` marker
    pub is_header: bool,

    /// The `kind` marker itself (e.g. "columnHeader")
    pub kind: Option<String>,

    /// Cell text
    pub text: String,
}

impl TableCell {
    /// Create a plain content cell.
    pub fn new(row_index: u32, column_index: u32, text: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            is_header: false,
            kind: None,
            text: text.into(),
        }
    }

    /// Set the `kind` marker and return self.
    ///
    /// Any marker counts as a header; this is an approximation, since the
    /// service also tags non-header kinds such as `stubHead` and `description`.
    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.is_header = kind.is_some();
        self.kind = kind;
        self
    }
}
