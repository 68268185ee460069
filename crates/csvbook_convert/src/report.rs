//! Conversion report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::conf::C_REPORT_PREFIX;

/// Aggregate counters and diagnostics for one `convert_files` run.
#[derive(Debug, Default, Clone)]
pub struct ReportConvert {
    /// Input files read and parsed.
    pub cnt_files: u64,
    /// Rows written across all sheets.
    pub cnt_rows: u64,
    /// Worksheets written (after Excel-limit slicing).
    pub cnt_sheets: u64,
    /// Workbooks saved to disk.
    pub cnt_workbooks: u64,
    /// Non-fatal warnings collected while reading and writing.
    pub warnings: Vec<String>,
    /// Saved workbook paths in write order.
    pub files_out: Vec<PathBuf>,
}

impl ReportConvert {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_files".to_string(), self.cnt_files);
        dict_counts.insert("cnt_rows".to_string(), self.cnt_rows);
        dict_counts.insert("cnt_sheets".to_string(), self.cnt_sheets);
        dict_counts.insert("cnt_workbooks".to_string(), self.cnt_workbooks);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} files={} rows={} sheets={} workbooks={} warnings={}",
            self.cnt_files,
            self.cnt_rows,
            self.cnt_sheets,
            self.cnt_workbooks,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportConvert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(C_REPORT_PREFIX))
    }
}

/// Mutable accumulator for conversion statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportConvertBuilder {
    pub cnt_files: u64,
    pub cnt_rows: u64,
    pub cnt_sheets: u64,
    pub cnt_workbooks: u64,
    pub warnings: Vec<String>,
    pub files_out: Vec<PathBuf>,
}

impl ReportConvertBuilder {
    pub fn add_file(&mut self) {
        self.cnt_files += 1;
    }

    pub fn add_rows(&mut self, n_rows: usize) {
        self.cnt_rows += n_rows as u64;
    }

    pub fn add_sheets(&mut self, n_sheets: usize) {
        self.cnt_sheets += n_sheets as u64;
    }

    /// Record one saved workbook.
    pub fn add_workbook(&mut self, path: PathBuf) {
        self.cnt_workbooks += 1;
        self.files_out.push(path);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportConvert {
        ReportConvert {
            cnt_files: self.cnt_files,
            cnt_rows: self.cnt_rows,
            cnt_sheets: self.cnt_sheets,
            cnt_workbooks: self.cnt_workbooks,
            warnings: self.warnings,
            files_out: self.files_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ReportConvert, ReportConvertBuilder};
    use crate::conf::C_REPORT_PREFIX;

    #[test]
    fn report_convert_to_dict_and_format() {
        let report = ReportConvert {
            cnt_files: 2,
            cnt_rows: 7,
            cnt_sheets: 2,
            cnt_workbooks: 1,
            warnings: vec!["w".to_string()],
            files_out: vec![],
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_files"], 2);
        assert_eq!(dict_counts["cnt_rows"], 7);
        assert_eq!(dict_counts["cnt_sheets"], 2);
        assert_eq!(dict_counts["cnt_workbooks"], 1);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format(C_REPORT_PREFIX);
        assert_eq!(
            txt,
            "[CONVERT] files=2 rows=7 sheets=2 workbooks=1 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn report_builder_accumulates() {
        let mut builder = ReportConvertBuilder::default();
        builder.add_file();
        builder.add_file();
        builder.add_rows(3);
        builder.add_rows(4);
        builder.add_sheets(2);
        builder.add_workbook(PathBuf::from("a.xlsx"));
        builder.add_warning("late quote".to_string());

        let report = builder.build();
        assert_eq!(report.cnt_files, 2);
        assert_eq!(report.cnt_rows, 7);
        assert_eq!(report.cnt_sheets, 2);
        assert_eq!(report.cnt_workbooks, 1);
        assert_eq!(report.files_out, vec![PathBuf::from("a.xlsx")]);
        assert_eq!(report.warning_count(), 1);
    }
}
