//! Input file reading and text decoding.

use std::fs;
use std::path::Path;

use encoding_rs::UTF_8;
use tracing::{debug, warn};

use crate::spec::CsvReadError;

/// Read a CSV file and decode it to text.
///
/// Decoding follows [`decode_csv_bytes`]; only I/O failures are errors.
pub fn read_csv_text(path: impl AsRef<Path>) -> Result<String, CsvReadError> {
    let path = path.as_ref();
    let v_bytes = fs::read(path).map_err(|source| CsvReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), n_bytes = v_bytes.len(), "read csv file");

    let (text, if_had_errors) = decode_csv_bytes(&v_bytes);
    if if_had_errors {
        warn!(
            path = %path.display(),
            "malformed byte sequences replaced with U+FFFD while decoding"
        );
    }
    Ok(text)
}

/// Decode raw bytes as UTF-8 text.
///
/// A leading byte-order mark is consumed (a UTF-16 BOM switches the decoder to
/// UTF-16), and malformed sequences become U+FFFD. The flag reports whether any
/// replacement happened.
pub fn decode_csv_bytes(v_bytes: &[u8]) -> (String, bool) {
    let (text, _encoding_used, if_had_errors) = UTF_8.decode(v_bytes);
    (text.into_owned(), if_had_errors)
}

#[cfg(test)]
mod tests {
    use super::{decode_csv_bytes, read_csv_text};
    use crate::spec::CsvReadError;

    #[test]
    fn decode_strips_utf8_bom() {
        let (text, if_had_errors) = decode_csv_bytes(b"\xEF\xBB\xBFa,b");
        assert_eq!(text, "a,b");
        assert!(!if_had_errors);
    }

    #[test]
    fn decode_replaces_malformed_bytes() {
        let (text, if_had_errors) = decode_csv_bytes(b"a,\xFF");
        assert_eq!(text, "a,\u{FFFD}");
        assert!(if_had_errors);
    }

    #[test]
    fn decode_keeps_non_ascii_text() {
        let (text, _) = decode_csv_bytes("名稱,金額".as_bytes());
        assert_eq!(text, "名稱,金額");
    }

    #[test]
    fn read_csv_text_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a.csv");
        std::fs::write(&path, "Name,Amount\r\nAlice,+100.00\r\n").expect("write csv");

        let text = read_csv_text(&path).expect("read csv");
        assert_eq!(text, "Name,Amount\r\nAlice,+100.00\r\n");
    }

    #[test]
    fn read_csv_text_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.csv");

        let err = read_csv_text(&path).expect_err("missing file must fail");
        let CsvReadError::Io { source, .. } = &err;
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("missing.csv"));
    }
}
