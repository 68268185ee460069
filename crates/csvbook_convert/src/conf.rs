//! Conversion constants and default preset factories.

use std::path::PathBuf;

use csvbook_io_xlsx::derive_default_xlsx_write_options;

use crate::spec::{EnumConvertMode, SpecConvertOptions};

/// Label appended to the merged workbook file name.
pub const C_MERGED_LABEL_DEFAULT: &str = "合併金流";
/// Sheet name used in individual-mode workbooks.
pub const C_SHEET_NAME_INDIVIDUAL: &str = "Sheet1";
/// Output file extension (without the dot).
pub const C_EXTENSION_XLSX: &str = "xlsx";
/// Local-time prefix of the merged workbook file name (`MMDD_HHmm`).
pub const C_FMT_MERGED_TIMESTAMP: &str = "%m%d_%H%M";
/// Default glob applied to files found in directory inputs.
pub const C_PATTERN_INCLUDE_DEFAULT: &str = "*.csv";
/// Report line prefix.
pub const C_REPORT_PREFIX: &str = "[CONVERT]";

/// Build default conversion options writing into the current directory.
pub fn derive_default_convert_options() -> SpecConvertOptions {
    SpecConvertOptions {
        rule_mode: EnumConvertMode::Individual,
        dir_out: PathBuf::from("."),
        merged_label: C_MERGED_LABEL_DEFAULT.to_string(),
        if_clean: true,
        write_options: derive_default_xlsx_write_options(),
        time_merged: None,
    }
}
