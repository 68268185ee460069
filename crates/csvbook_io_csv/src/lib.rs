//! `csvbook_io_csv` v1:
//! Rust-side CSV kernel.
//!
//! Architecture:
//! - `conf`    : constants and cleaning patterns
//! - `spec`    : document model, reports and errors
//! - `parser`  : quote-aware CSV tokenizer
//! - `cleaner` : amount / leading-plus cell normalization
//! - `reader`  : file reading and text decoding
//! - `queue`   : de-duplicating input file queue
pub mod cleaner;
pub mod conf;
pub mod parser;
pub mod queue;
pub mod reader;
pub mod spec;

pub use cleaner::{clean, clean_document};
pub use conf::{C_SUFFIX_CSV, PAT_CELL_AMOUNT, PAT_CELL_PLUS_DIGITS};
pub use parser::{parse, parse_with_report};
pub use queue::{SpecFileEntry, SpecFileQueue};
pub use reader::{decode_csv_bytes, read_csv_text};
pub use spec::{Cell, CsvReadError, Document, Row, SpecCsvParseReport};
