//! Document model, parse report and read errors.

use std::path::PathBuf;

/// One delimited value. Empty string is a meaningful value.
pub type Cell = String;

/// Cells of one logical CSV line. Lengths may differ between rows.
pub type Row = Vec<Cell>;

////////////////////////////////////////////////////////////////////////////////
// #region Document

/// Ordered rows parsed from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    /// Wrap already tokenized rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Borrow rows in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consume into raw rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Longest row length (`0` for an empty document).
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for Document {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl IntoIterator for Document {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportAndErrors

/// Diagnostics collected by one parse call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecCsvParseReport {
    /// Input ended while still inside a quoted field.
    pub if_unterminated_quote: bool,
    /// Emitted rows.
    pub n_rows: usize,
    /// Emitted cells across all rows.
    pub n_cells: usize,
}

/// Failure to obtain text for one input file.
#[derive(Debug, thiserror::Error)]
pub enum CsvReadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CsvReadError {
    /// Path of the file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
