//! Conversion options and top-level error types.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use csvbook_io_csv::CsvReadError;
use csvbook_io_xlsx::{SpecXlsxWriteOptions, XlsxWriteError};

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Output layout for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumConvertMode {
    /// One workbook per input file, single sheet `Sheet1`.
    #[default]
    Individual,
    /// One workbook, one sheet per input file (`01`, `02`, ...).
    Merged,
}

impl std::str::FromStr for EnumConvertMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "individual" => Ok(Self::Individual),
            "merged" => Ok(Self::Merged),
            _ => Err(format!(
                "Invalid conversion mode: `{value}`. Expected one of: ['individual', 'merged']"
            )),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `convert_files`.
#[derive(Debug, Clone)]
pub struct SpecConvertOptions {
    /// Output layout.
    pub rule_mode: EnumConvertMode,
    /// Existing directory receiving the workbooks.
    pub dir_out: PathBuf,
    /// Merged-mode file name label.
    pub merged_label: String,
    /// Apply cell cleaning before writing.
    pub if_clean: bool,
    /// Options forwarded to the XLSX writer.
    pub write_options: SpecXlsxWriteOptions,
    /// Fixed timestamp for the merged file name. `None` uses local now.
    pub time_merged: Option<NaiveDateTime>,
}

impl Default for SpecConvertOptions {
    fn default() -> Self {
        crate::conf::derive_default_convert_options()
    }
}

/// Conversion failures. The first one aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Read(#[from] CsvReadError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxWriteError,
    },
    #[error("No CSV files queued for conversion.")]
    EmptyQueue,
    #[error("Output directory does not exist or is not a directory: {}", .0.display())]
    InvalidOutput(PathBuf),
    #[error("Invalid include pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl ConvertError {
    /// Whether the failure came from reading or writing files, as opposed to bad arguments.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Write { .. })
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
