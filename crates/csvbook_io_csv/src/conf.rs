//! CSV constants and cleaning pattern definitions.

/// Field delimiter.
pub const CHR_DELIMITER: char = ',';
/// Quote character; doubled inside a quoted field to escape itself.
pub const CHR_QUOTE: char = '"';
/// Carriage return.
pub const CHR_CR: char = '\r';
/// Line feed.
pub const CHR_LF: char = '\n';
/// Byte-order mark; trimmed from cells like whitespace.
pub const CHR_BOM: char = '\u{FEFF}';

/// File name suffix accepted by the input queue (compared case-insensitively).
pub const C_SUFFIX_CSV: &str = ".csv";

/// Whole-cell amount: optional `+`, ASCII digits, optional literal `.00`.
pub const PAT_CELL_AMOUNT: &str = r"^(\+)?[0-9]+(\.00)?$";
/// Whole-cell `+` followed by ASCII digits.
pub const PAT_CELL_PLUS_DIGITS: &str = r"^\+[0-9]+$";

/// Literal amount suffix removed from matching cells.
pub const C_SUFFIX_AMOUNT: &str = ".00";
/// Leading sign removed from matching cells.
pub const CHR_PLUS: char = '+';
