//! `csvbook_io_xlsx` v1:
//! Rust-side XLSX writer kernel for string grids.
//!
//! Architecture:
//! - `conf`   : Excel limits and default presets
//! - `spec`   : formats, policies, reports and errors
//! - `util`   : pure helper functions
//! - `writer` : workbook writer forcing text-formatted cells
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_NUM_FORMAT_TEXT, C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL, derive_default_xlsx_write_options,
    derive_text_cell_format,
};
pub use spec::{
    EnumAutofitColumnsRule, SpecAutofitCellsPolicy, SpecSheetSlice, SpecXlsxReport,
    SpecXlsxWriteOptions, XlsxWriteError,
};
pub use util::{
    create_sheet_identifier, estimate_unicode_string_width, format_sheet_index,
    plan_sheet_slices, sanitize_sheet_name,
};
pub use writer::XlsxWriter;
