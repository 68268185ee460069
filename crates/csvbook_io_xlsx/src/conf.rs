//! XLSX constants and default preset factories.

use rust_xlsxwriter::Format;

use crate::spec::SpecXlsxWriteOptions;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Number format code that makes Excel display a cell as literal text.
pub const C_NUM_FORMAT_TEXT: &str = "@";
/// Fallback sheet name after sanitizing an empty name.
pub const C_SHEET_NAME_DEFAULT: &str = "Sheet";

/// Build the format applied to every written cell.
pub fn derive_text_cell_format() -> Format {
    Format::new().set_num_format(C_NUM_FORMAT_TEXT)
}

/// Build default write options.
pub fn derive_default_xlsx_write_options() -> SpecXlsxWriteOptions {
    SpecXlsxWriteOptions::default()
}
