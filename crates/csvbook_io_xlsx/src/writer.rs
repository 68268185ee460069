//! XLSX writer kernel that renders string grids as text-formatted sheets.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, warn};

use crate::conf::derive_text_cell_format;
use crate::spec::{
    EnumAutofitColumnsRule, SpecAutofitCellsPolicy, SpecSheetSlice, SpecXlsxReport,
    SpecXlsxWriteOptions, XlsxWriteError,
};
use crate::util::{
    derive_unique_sheet_name, estimate_unicode_string_width, plan_sheet_slices,
    sanitize_sheet_name,
};

/// Stateful workbook writer.
///
/// Every cell present in a row is written with a text number format (`@`), so values
/// such as `0099` keep their leading zeros when opened in Excel.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_text: Format,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and write options.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf, write_options: SpecXlsxWriteOptions) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_text: derive_text_cell_format(),
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Number of worksheets added so far.
    pub fn sheet_count(&self) -> usize {
        self.set_sheet_names_existing.len()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        debug!(path = %self.path_file_out.display(), "workbook saved");
        Ok(())
    }

    /// Write one logical sheet from rows of string cells.
    ///
    /// Rows may have different lengths; only cells present in a row are written.
    /// Grids beyond Excel limits are split into several sheets (see
    /// [`plan_sheet_slices`]).
    pub fn write_sheet<R>(&mut self, rows: &[R], sheet_name: &str) -> Result<(), XlsxWriteError>
    where
        R: AsRef<[String]>,
    {
        if self.if_closed {
            return Err(XlsxWriteError::Closed);
        }
        validate_policy_autofit(&self.write_options.policy_autofit)?;

        let n_height = rows.len();
        let n_width = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);

        let mut report = SpecXlsxReport::default();
        let l_sheet_parts = plan_sheet_slices(
            n_height,
            n_width,
            &sanitize_sheet_name(sheet_name, "_"),
            &mut report,
        );
        if l_sheet_parts.len() > 1 {
            warn!(
                sheet_name,
                n_height,
                n_width,
                n_parts = l_sheet_parts.len(),
                "grid exceeds Excel limits; splitting into several sheets"
            );
        }

        let policy_autofit = self.write_options.policy_autofit.clone();

        for sheet_slice in l_sheet_parts {
            let sheet_name_unique =
                derive_unique_sheet_name(&sheet_slice.sheet_name, &mut self.set_sheet_names_existing);
            let worksheet = self.workbook.add_worksheet();
            worksheet.set_name(&sheet_name_unique)?;

            write_sheet_slice(worksheet, rows, &sheet_slice, &self.fmt_text, &policy_autofit)?;
            debug!(
                sheet_name = %sheet_name_unique,
                n_rows = sheet_slice.row_end_exclusive - sheet_slice.row_start_inclusive,
                "sheet written"
            );

            report.sheets.push(SpecSheetSlice {
                sheet_name: sheet_name_unique,
                ..sheet_slice
            });
        }

        self.l_reports.push(report);
        Ok(())
    }
}

fn write_sheet_slice<R>(
    worksheet: &mut Worksheet,
    rows: &[R],
    sheet_slice: &SpecSheetSlice,
    fmt_text: &Format,
    policy_autofit: &SpecAutofitCellsPolicy,
) -> Result<(), XlsxWriteError>
where
    R: AsRef<[String]>,
{
    let n_col_start = sheet_slice.col_start_inclusive;
    let n_width_slice = sheet_slice.col_end_exclusive - n_col_start;
    let mut l_width_by_col = vec![0usize; n_width_slice];
    let mut n_rows_body_seen = 0usize;

    let l_rows_slice = &rows[sheet_slice.row_start_inclusive..sheet_slice.row_end_exclusive];
    for (n_row_local, row) in l_rows_slice.iter().enumerate() {
        let row = row.as_ref();
        let if_is_first_row = sheet_slice.row_start_inclusive + n_row_local == 0;
        let if_measure = should_measure_row(policy_autofit, if_is_first_row, n_rows_body_seen);
        if !if_is_first_row {
            n_rows_body_seen += 1;
        }

        let n_col_end = usize::min(row.len(), sheet_slice.col_end_exclusive);
        if n_col_start >= n_col_end {
            continue;
        }
        for (n_idx_col, value) in row[n_col_start..n_col_end].iter().enumerate() {
            if if_measure {
                l_width_by_col[n_idx_col] = usize::max(
                    l_width_by_col[n_idx_col],
                    estimate_unicode_string_width(value),
                );
            }
            write_text_cell(worksheet, n_row_local, n_idx_col, value, fmt_text)?;
        }
    }

    if !matches!(policy_autofit.rule_columns, EnumAutofitColumnsRule::None) {
        let n_min = usize::max(1, policy_autofit.width_cell_min);
        let n_max = usize::min(255, usize::max(n_min, policy_autofit.width_cell_max));
        let n_pad = policy_autofit.width_cell_padding;

        for (n_idx_col, n_width_recorded) in l_width_by_col.iter().enumerate() {
            let n_width_final = usize::min(n_max, usize::max(n_min, n_width_recorded + n_pad));
            worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)?;
        }
    }

    Ok(())
}

fn should_measure_row(
    policy_autofit: &SpecAutofitCellsPolicy,
    if_is_first_row: bool,
    n_rows_body_seen: usize,
) -> bool {
    let if_body_within_limit = policy_autofit
        .height_body_inferred_max
        .is_none_or(|n_max| n_rows_body_seen < n_max);
    match policy_autofit.rule_columns {
        EnumAutofitColumnsRule::None => false,
        EnumAutofitColumnsRule::Header => if_is_first_row,
        EnumAutofitColumnsRule::Body => !if_is_first_row && if_body_within_limit,
        EnumAutofitColumnsRule::All => if_is_first_row || if_body_within_limit,
    }
}

fn validate_policy_autofit(policy_autofit: &SpecAutofitCellsPolicy) -> Result<(), XlsxWriteError> {
    if policy_autofit.width_cell_min == 0 {
        return Err(XlsxWriteError::InvalidPolicy(
            "policy_autofit.width_cell_min must be >= 1.".to_string(),
        ));
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(XlsxWriteError::InvalidPolicy(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min.".to_string(),
        ));
    }
    Ok(())
}

fn write_text_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &str,
    format: &Format,
) -> Result<(), XlsxWriteError> {
    // Empty strings are still populated cells; keep their text format.
    if value.is_empty() {
        worksheet.write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)?;
    } else {
        worksheet.write_string_with_format(
            cast_row_num(row_idx)?,
            cast_col_num(col_idx)?,
            value,
            format,
        )?;
    }
    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32, XlsxWriteError> {
    u32::try_from(value).map_err(|_| XlsxWriteError::IndexOverflow { axis: "row", value })
}

fn cast_col_num(value: usize) -> Result<u16, XlsxWriteError> {
    u16::try_from(value).map_err(|_| XlsxWriteError::IndexOverflow {
        axis: "column",
        value,
    })
}
