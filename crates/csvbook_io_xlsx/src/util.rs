//! Stateless helper utilities used by the XLSX writer kernel.

use std::collections::BTreeSet;

use crate::conf::{
    C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::{SpecSheetSlice, SpecXlsxReport};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = C_SHEET_NAME_DEFAULT.to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Zero-padded 1-based sheet label (`01`, `02`, ..., `100`).
pub fn format_sheet_index(idx_1based: usize) -> String {
    format!("{idx_1based:02}")
}

/// Return `name` if unused, else the first free `name__N` (N >= 2). Records the result.
pub fn derive_unique_sheet_name(name: &str, set_existing: &mut BTreeSet<String>) -> String {
    if !set_existing.contains(name) {
        set_existing.insert(name.to_string());
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if !set_existing.contains(&candidate) {
            set_existing.insert(candidate.clone());
            return candidate;
        }
        n_idx += 1;
    }
}

/// Split a `height x width` grid into Excel-compliant sheet slices.
///
/// Always yields at least one slice so empty documents still get a sheet.
pub fn plan_sheet_slices(
    height: usize,
    width: usize,
    sheet_name: &str,
    report: &mut SpecXlsxReport,
) -> Vec<SpecSheetSlice> {
    let l_col_slices = derive_bounded_ranges(width, N_NCOLS_EXCEL_MAX);
    let l_row_slices = derive_bounded_ranges(height, N_NROWS_EXCEL_MAX);

    let n_parts_total = l_col_slices.len() * l_row_slices.len();

    let mut l_sheet_parts = Vec::with_capacity(n_parts_total);
    let mut n_idx_part = 1;
    for (col_start, col_end) in &l_col_slices {
        for (row_start, row_end) in &l_row_slices {
            let c_part_sheet_name = if n_parts_total == 1 {
                sheet_name.to_string()
            } else {
                create_sheet_identifier(sheet_name, n_idx_part)
            };

            l_sheet_parts.push(SpecSheetSlice {
                sheet_name: c_part_sheet_name,
                row_start_inclusive: *row_start,
                row_end_exclusive: *row_end,
                col_start_inclusive: *col_start,
                col_end_exclusive: *col_end,
            });
            n_idx_part += 1;
        }
    }

    if n_parts_total > 1 {
        report.warn(format!(
            "Excel limit overflow: split into {} sheets (columns-first, then rows).",
            l_sheet_parts.len()
        ));
    }

    l_sheet_parts
}

fn derive_bounded_ranges(n_total: usize, n_max: usize) -> Vec<(usize, usize)> {
    let mut l_ranges = Vec::new();
    let mut n_start = 0;
    while n_start < n_total {
        let n_end = usize::min(n_total, n_start + n_max);
        l_ranges.push((n_start, n_end));
        n_start = n_end;
    }
    if l_ranges.is_empty() {
        l_ranges.push((0, 0));
    }
    l_ranges
}

/// Create suffixed sheet name (`base_1`, `base_2`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("_{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Autofit

/// Estimate displayed width units of a text cell; non-ASCII chars count 1.6.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
