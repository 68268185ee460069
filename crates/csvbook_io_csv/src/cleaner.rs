//! Cell normalization for amount-like values.
//!
//! Only whole-cell matches are rewritten, so account numbers, phone numbers and other
//! digit strings keep their leading zeros.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::conf::{C_SUFFIX_AMOUNT, CHR_PLUS, PAT_CELL_AMOUNT, PAT_CELL_PLUS_DIGITS};
use crate::spec::{Document, Row};

static RE_CELL_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(PAT_CELL_AMOUNT).expect("PAT_CELL_AMOUNT is a valid regex"));
static RE_CELL_PLUS_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(PAT_CELL_PLUS_DIGITS).expect("PAT_CELL_PLUS_DIGITS is a valid regex")
});

/// Clean one cell.
///
/// Rules, first match wins:
/// 1. `^(\+)?[0-9]+(\.00)?$`: drop the leading `+` and a trailing `.00`.
/// 2. `+` followed only by digits: drop the `+`.
/// 3. Anything else is returned unchanged.
pub fn clean(cell: &str) -> String {
    if RE_CELL_AMOUNT.is_match(cell) {
        let c_unsigned = cell.strip_prefix(CHR_PLUS).unwrap_or(cell);
        let c_digits = c_unsigned
            .strip_suffix(C_SUFFIX_AMOUNT)
            .unwrap_or(c_unsigned);
        return c_digits.to_string();
    }

    // Checked on its own even though rule 1 currently covers it.
    if cell.starts_with(CHR_PLUS) && RE_CELL_PLUS_DIGITS.is_match(cell) {
        return cell[CHR_PLUS.len_utf8()..].to_string();
    }

    cell.to_string()
}

/// Apply [`clean`] to every cell, keeping row/column structure and order.
pub fn clean_document(document: Document) -> Document {
    let l_rows = document
        .into_iter()
        .map(|row| row.iter().map(|cell| clean(cell)).collect::<Row>())
        .collect::<Vec<Row>>();
    Document::new(l_rows)
}
