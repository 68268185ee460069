//! Single-pass, quote-aware CSV tokenizer.
//!
//! The scan is total over every input string: there is no error path, and input that
//! ends inside a quoted field is flushed as if the quote had been closed.

use crate::conf::{CHR_BOM, CHR_CR, CHR_DELIMITER, CHR_LF, CHR_QUOTE};
use crate::spec::{Document, Row, SpecCsvParseReport};

/// Parse CSV text into a [`Document`].
///
/// Accepts CR, LF and CRLF row terminators. Every cell is trimmed when closed, quoted
/// or not; a byte-order mark counts as whitespace. Blank lines produce no row.
pub fn parse(text: &str) -> Document {
    parse_with_report(text).0
}

/// Parse CSV text and return the document with scan diagnostics.
pub fn parse_with_report(text: &str) -> (Document, SpecCsvParseReport) {
    let mut l_rows: Vec<Row> = Vec::new();
    let mut l_row_current: Row = Vec::new();
    let mut c_cell_current = String::new();
    let mut if_in_quotes = false;

    let mut it_chars = text.chars().peekable();
    while let Some(chr) = it_chars.next() {
        match chr {
            CHR_QUOTE => {
                if if_in_quotes && it_chars.peek() == Some(&CHR_QUOTE) {
                    c_cell_current.push(CHR_QUOTE);
                    it_chars.next();
                } else {
                    if_in_quotes = !if_in_quotes;
                }
            }
            CHR_DELIMITER if !if_in_quotes => {
                close_cell(&mut l_row_current, &mut c_cell_current);
            }
            CHR_CR | CHR_LF if !if_in_quotes => {
                if chr == CHR_CR && it_chars.peek() == Some(&CHR_LF) {
                    it_chars.next();
                }
                flush_row(&mut l_rows, &mut l_row_current, &mut c_cell_current);
            }
            _ => c_cell_current.push(chr),
        }
    }
    flush_row(&mut l_rows, &mut l_row_current, &mut c_cell_current);

    let document = Document::new(l_rows);
    let report = SpecCsvParseReport {
        if_unterminated_quote: if_in_quotes,
        n_rows: document.height(),
        n_cells: document.cell_count(),
    };
    (document, report)
}

fn close_cell(row: &mut Row, cell: &mut String) {
    row.push(
        cell.trim_matches(|chr: char| chr.is_whitespace() || chr == CHR_BOM)
            .to_string(),
    );
    cell.clear();
}

/// Close the pending cell and emit the row, unless the logical line is still blank.
///
/// The pending cell is tested before trimming: a line of only spaces emits `[""]`.
fn flush_row(rows: &mut Vec<Row>, row: &mut Row, cell: &mut String) {
    if !cell.is_empty() || !row.is_empty() {
        close_cell(row, cell);
        rows.push(std::mem::take(row));
    }
    row.clear();
    cell.clear();
}
