//! `csvbook_convert` v1:
//! CSV to XLSX conversion runs and the `csvbook` CLI.
//!
//! Architecture:
//! - `conf`    : defaults (labels, sheet names, patterns)
//! - `spec`    : modes/options/errors
//! - `report`  : run-time report model
//! - `input`   : file/directory inputs to file queue
//! - `convert` : individual and merged conversion
//! - `cli`     : `clap` arguments and entry point

pub mod cli;
pub mod conf;
pub mod convert;
pub mod input;
pub mod report;
pub mod spec;

pub use conf::{
    C_MERGED_LABEL_DEFAULT, C_REPORT_PREFIX, C_SHEET_NAME_INDIVIDUAL,
    derive_default_convert_options,
};
pub use convert::{
    convert_files, derive_individual_file_name, derive_merged_file_name, derive_unique_file_name,
    load_document,
};
pub use input::{collect_input_queue, compile_include_pattern};
pub use report::{ReportConvert, ReportConvertBuilder};
pub use spec::{ConvertError, EnumConvertMode, SpecConvertOptions};
