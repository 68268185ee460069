//! Conversion orchestration: read, parse, clean, then write workbooks.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use csvbook_io_csv::{
    Document, SpecFileEntry, SpecFileQueue, clean_document, parse_with_report, read_csv_text,
};
use csvbook_io_xlsx::{XlsxWriter, format_sheet_index};
use tracing::{debug, info, warn};

use crate::conf::{C_EXTENSION_XLSX, C_FMT_MERGED_TIMESTAMP, C_SHEET_NAME_INDIVIDUAL};
use crate::report::{ReportConvert, ReportConvertBuilder};
use crate::spec::{ConvertError, EnumConvertMode, SpecConvertOptions};

/// Convert every queued file, in queue order.
///
/// Files are processed sequentially and the first failure aborts the run. In merged mode
/// all inputs are read before anything is written, so a read failure leaves no workbook.
pub fn convert_files(
    queue: &SpecFileQueue,
    options: &SpecConvertOptions,
) -> Result<ReportConvert, ConvertError> {
    if !queue.is_convertible() {
        return Err(ConvertError::EmptyQueue);
    }
    if !options.dir_out.is_dir() {
        return Err(ConvertError::InvalidOutput(options.dir_out.clone()));
    }

    let mut report = ReportConvertBuilder::default();
    match options.rule_mode {
        EnumConvertMode::Individual => convert_individual(queue, options, &mut report)?,
        EnumConvertMode::Merged => convert_merged(queue, options, &mut report)?,
    }

    let report = report.build();
    info!("{report}");
    Ok(report)
}

/// Read, parse and optionally clean one queued file.
pub fn load_document(
    entry: &SpecFileEntry,
    if_clean: bool,
    report: &mut ReportConvertBuilder,
) -> Result<Document, ConvertError> {
    let text = read_csv_text(&entry.path)?;
    let (document, parse_report) = parse_with_report(&text);
    if parse_report.if_unterminated_quote {
        warn!(name = %entry.name, "input ends inside a quoted field; closing it implicitly");
        report.add_warning(format!(
            "{}: input ends inside a quoted field",
            entry.name
        ));
    }
    debug!(
        name = %entry.name,
        n_rows = parse_report.n_rows,
        n_cells = parse_report.n_cells,
        "parsed input"
    );
    report.add_file();

    Ok(if if_clean {
        clean_document(document)
    } else {
        document
    })
}

/// Output file name for individual mode: input name with an `.xlsx` extension.
pub fn derive_individual_file_name(name_input: &str) -> String {
    Path::new(name_input)
        .with_extension(C_EXTENSION_XLSX)
        .to_string_lossy()
        .to_string()
}

/// Return `name` if unused in this run, else the first free `{stem}__N.xlsx` (N >= 2).
///
/// Names are compared case-insensitively. Records the result.
pub fn derive_unique_file_name(name: &str, set_used: &mut BTreeSet<String>) -> String {
    if set_used.insert(name.to_lowercase()) {
        return name.to_string();
    }

    let c_stem = Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut n_idx = 2usize;
    loop {
        let candidate = format!("{c_stem}__{n_idx}.{C_EXTENSION_XLSX}");
        if set_used.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n_idx += 1;
    }
}

/// Output file name for merged mode: `{MM}{DD}_{HH}{mm}{label}.xlsx`.
pub fn derive_merged_file_name(label: &str, time: &NaiveDateTime) -> String {
    format!(
        "{}{label}.{C_EXTENSION_XLSX}",
        time.format(C_FMT_MERGED_TIMESTAMP)
    )
}

fn convert_individual(
    queue: &SpecFileQueue,
    options: &SpecConvertOptions,
    report: &mut ReportConvertBuilder,
) -> Result<(), ConvertError> {
    let mut set_names_used = BTreeSet::new();
    for entry in queue.entries() {
        let document = load_document(entry, options.if_clean, report)?;
        let c_name_out =
            derive_unique_file_name(&derive_individual_file_name(&entry.name), &mut set_names_used);
        let path_file_out = options.dir_out.join(c_name_out);

        let mut writer = new_writer(path_file_out, options);
        write_document(&mut writer, &document, C_SHEET_NAME_INDIVIDUAL, report)?;
        finish_workbook(writer, report)?;
    }
    Ok(())
}

fn convert_merged(
    queue: &SpecFileQueue,
    options: &SpecConvertOptions,
    report: &mut ReportConvertBuilder,
) -> Result<(), ConvertError> {
    let l_documents = queue
        .entries()
        .iter()
        .map(|entry| load_document(entry, options.if_clean, report))
        .collect::<Result<Vec<_>, _>>()?;

    let time = options
        .time_merged
        .unwrap_or_else(|| Local::now().naive_local());
    let path_file_out = options
        .dir_out
        .join(derive_merged_file_name(&options.merged_label, &time));

    let mut writer = new_writer(path_file_out, options);
    for (n_idx, document) in l_documents.iter().enumerate() {
        write_document(&mut writer, document, &format_sheet_index(n_idx + 1), report)?;
    }
    finish_workbook(writer, report)
}

fn new_writer(path_file_out: PathBuf, options: &SpecConvertOptions) -> XlsxWriter {
    XlsxWriter::new(path_file_out, options.write_options.clone())
}

fn write_document(
    writer: &mut XlsxWriter,
    document: &Document,
    sheet_name: &str,
    report: &mut ReportConvertBuilder,
) -> Result<(), ConvertError> {
    writer
        .write_sheet(document.rows(), sheet_name)
        .map_err(|source| ConvertError::Write {
            path: writer.file_out().to_path_buf(),
            source,
        })?;
    report.add_rows(document.height());
    Ok(())
}

fn finish_workbook(
    mut writer: XlsxWriter,
    report: &mut ReportConvertBuilder,
) -> Result<(), ConvertError> {
    let path_file_out = writer.file_out().to_path_buf();
    writer.close().map_err(|source| ConvertError::Write {
        path: path_file_out.clone(),
        source,
    })?;

    for report_sheet in writer.report() {
        report.add_sheets(report_sheet.sheets.len());
        for warning in report_sheet.warnings {
            report.add_warning(warning);
        }
    }
    info!(path = %path_file_out.display(), n_sheets = writer.sheet_count(), "workbook written");
    report.add_workbook(path_file_out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io::Read;
    use std::path::{Path, PathBuf};

    use chrono::NaiveDate;
    use csvbook_io_csv::{SpecFileEntry, SpecFileQueue};
    use pretty_assertions::assert_eq;

    use super::{
        convert_files, derive_individual_file_name, derive_merged_file_name,
        derive_unique_file_name,
    };
    use crate::conf::derive_default_convert_options;
    use crate::spec::{ConvertError, EnumConvertMode, SpecConvertOptions};

    fn read_part(path: &Path, name: &str) -> String {
        let file = fs::File::open(path).expect("open xlsx");
        let mut archive = zip::ZipArchive::new(file).expect("xlsx is a zip archive");
        let mut part = archive.by_name(name).expect("part exists");
        let mut txt = String::new();
        part.read_to_string(&mut txt).expect("read part");
        txt
    }

    fn queue_of(dir: &Path, l_files: &[(&str, &str)]) -> SpecFileQueue {
        let mut queue = SpecFileQueue::new();
        for (name, text) in l_files {
            let path = dir.join(name);
            fs::write(&path, text).expect("write csv");
            queue.add(SpecFileEntry::from_path(&path).expect("metadata"));
        }
        queue
    }

    fn options_into(dir_out: &Path, rule_mode: EnumConvertMode) -> SpecConvertOptions {
        SpecConvertOptions {
            rule_mode,
            dir_out: dir_out.to_path_buf(),
            time_merged: NaiveDate::from_ymd_opt(2024, 3, 7)
                .and_then(|date| date.and_hms_opt(9, 5, 0)),
            ..derive_default_convert_options()
        }
    }

    #[test]
    fn individual_file_name_replaces_extension() {
        assert_eq!(derive_individual_file_name("data.csv"), "data.xlsx");
        assert_eq!(derive_individual_file_name("DATA.CSV"), "DATA.xlsx");
        assert_eq!(derive_individual_file_name("a.b.csv"), "a.b.xlsx");
    }

    #[test]
    fn merged_file_name_uses_padded_local_timestamp() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_opt(9, 5, 0))
            .expect("valid time");
        assert_eq!(
            derive_merged_file_name("合併金流", &time),
            "0307_0905合併金流.xlsx"
        );
    }

    #[test]
    fn convert_individual_writes_one_workbook_per_file() {
        let dir_in = tempfile::tempdir().expect("tempdir");
        let dir_out = tempfile::tempdir().expect("tempdir");
        let queue = queue_of(
            dir_in.path(),
            &[
                ("a.csv", "Name,Amount\nAlice,+100.00\nBob,0099"),
                ("b.csv", "x\n"),
            ],
        );

        let report = convert_files(&queue, &options_into(dir_out.path(), EnumConvertMode::Individual))
            .expect("convert");
        assert_eq!(report.cnt_files, 2);
        assert_eq!(report.cnt_workbooks, 2);
        assert_eq!(report.cnt_sheets, 2);
        assert_eq!(report.cnt_rows, 4);
        assert_eq!(
            report.files_out,
            vec![dir_out.path().join("a.xlsx"), dir_out.path().join("b.xlsx")]
        );

        let path_a = dir_out.path().join("a.xlsx");
        assert!(read_part(&path_a, "xl/workbook.xml").contains(r#"name="Sheet1""#));
        let c_strings = read_part(&path_a, "xl/sharedStrings.xml");
        assert!(c_strings.contains("<t>100</t>"));
        assert!(c_strings.contains("<t>0099</t>"));
        assert!(!c_strings.contains("+100.00"));
    }

    #[test]
    fn unique_file_name_suffixes_repeats() {
        let mut set_used = BTreeSet::new();
        assert_eq!(derive_unique_file_name("a.xlsx", &mut set_used), "a.xlsx");
        assert_eq!(derive_unique_file_name("a.xlsx", &mut set_used), "a__2.xlsx");
        assert_eq!(derive_unique_file_name("A.xlsx", &mut set_used), "A__3.xlsx");
        assert_eq!(derive_unique_file_name("a__2.xlsx", &mut set_used), "a__2__2.xlsx");
    }

    #[test]
    fn convert_individual_same_name_inputs_get_distinct_outputs() {
        let dir_first = tempfile::tempdir().expect("tempdir");
        let dir_second = tempfile::tempdir().expect("tempdir");
        let dir_out = tempfile::tempdir().expect("tempdir");

        let mut queue = queue_of(dir_first.path(), &[("a.csv", "first")]);
        let path_second = dir_second.path().join("a.csv");
        fs::write(&path_second, "second,file").expect("write csv");
        assert!(queue.add(SpecFileEntry::from_path(&path_second).expect("metadata")));

        let report = convert_files(&queue, &options_into(dir_out.path(), EnumConvertMode::Individual))
            .expect("convert");
        let path_a = dir_out.path().join("a.xlsx");
        let path_a_2 = dir_out.path().join("a__2.xlsx");
        assert_eq!(report.cnt_workbooks, 2);
        assert_eq!(report.files_out, vec![path_a.clone(), path_a_2.clone()]);
        assert_eq!(fs::read_dir(dir_out.path()).expect("read dir").count(), 2);

        assert!(read_part(&path_a, "xl/sharedStrings.xml").contains("<t>first</t>"));
        assert!(read_part(&path_a_2, "xl/sharedStrings.xml").contains("<t>second</t>"));
    }

    #[test]
    fn convert_without_cleaning_keeps_raw_cells() {
        let dir_in = tempfile::tempdir().expect("tempdir");
        let dir_out = tempfile::tempdir().expect("tempdir");
        let queue = queue_of(dir_in.path(), &[("a.csv", "+100.00")]);

        let options = SpecConvertOptions {
            if_clean: false,
            ..options_into(dir_out.path(), EnumConvertMode::Individual)
        };
        convert_files(&queue, &options).expect("convert");

        let c_strings = read_part(&dir_out.path().join("a.xlsx"), "xl/sharedStrings.xml");
        assert!(c_strings.contains("<t>+100.00</t>"));
    }

    #[test]
    fn convert_merged_writes_padded_sheets_in_queue_order() {
        let dir_in = tempfile::tempdir().expect("tempdir");
        let dir_out = tempfile::tempdir().expect("tempdir");
        let queue = queue_of(
            dir_in.path(),
            &[("z.csv", "1"), ("a.csv", "2"), ("m.csv", "")],
        );

        let report = convert_files(&queue, &options_into(dir_out.path(), EnumConvertMode::Merged))
            .expect("convert");
        assert_eq!(report.cnt_files, 3);
        assert_eq!(report.cnt_workbooks, 1);
        assert_eq!(report.cnt_sheets, 3);

        let path_out: PathBuf = dir_out.path().join("0307_0905合併金流.xlsx");
        assert_eq!(report.files_out, vec![path_out.clone()]);

        let c_workbook = read_part(&path_out, "xl/workbook.xml");
        let n_pos_01 = c_workbook.find(r#"name="01""#).expect("sheet 01");
        let n_pos_02 = c_workbook.find(r#"name="02""#).expect("sheet 02");
        let n_pos_03 = c_workbook.find(r#"name="03""#).expect("sheet 03");
        assert!(n_pos_01 < n_pos_02 && n_pos_02 < n_pos_03);
    }

    #[test]
    fn convert_merged_read_failure_writes_nothing() {
        let dir_in = tempfile::tempdir().expect("tempdir");
        let dir_out = tempfile::tempdir().expect("tempdir");
        let mut queue = queue_of(dir_in.path(), &[("a.csv", "1")]);
        queue.add(SpecFileEntry {
            name: "gone.csv".to_string(),
            path: dir_in.path().join("gone.csv"),
            size: 0,
        });

        let result = convert_files(&queue, &options_into(dir_out.path(), EnumConvertMode::Merged));
        assert!(matches!(result, Err(ConvertError::Read(_))));
        assert_eq!(fs::read_dir(dir_out.path()).expect("read dir").count(), 0);
    }

    #[test]
    fn convert_individual_stops_at_first_read_failure() {
        let dir_in = tempfile::tempdir().expect("tempdir");
        let dir_out = tempfile::tempdir().expect("tempdir");
        let mut queue = queue_of(dir_in.path(), &[("a.csv", "1")]);
        queue.add(SpecFileEntry {
            name: "gone.csv".to_string(),
            path: dir_in.path().join("gone.csv"),
            size: 0,
        });
        let path_c = dir_in.path().join("c.csv");
        fs::write(&path_c, "3").expect("write csv");
        queue.add(SpecFileEntry::from_path(&path_c).expect("metadata"));

        let result = convert_files(&queue, &options_into(dir_out.path(), EnumConvertMode::Individual));
        assert!(matches!(result, Err(ConvertError::Read(_))));
        assert!(dir_out.path().join("a.xlsx").is_file());
        assert!(!dir_out.path().join("c.xlsx").exists());
    }

    #[test]
    fn convert_rejects_empty_queue_and_missing_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            convert_files(&SpecFileQueue::new(), &options_into(dir.path(), EnumConvertMode::Individual)),
            Err(ConvertError::EmptyQueue)
        ));

        let queue = queue_of(dir.path(), &[("a.csv", "1")]);
        assert!(matches!(
            convert_files(&queue, &options_into(&dir.path().join("nope"), EnumConvertMode::Individual)),
            Err(ConvertError::InvalidOutput(_))
        ));
    }

    #[test]
    fn convert_reports_unterminated_quote_warning() {
        let dir_in = tempfile::tempdir().expect("tempdir");
        let dir_out = tempfile::tempdir().expect("tempdir");
        let queue = queue_of(dir_in.path(), &[("q.csv", "a,\"open")]);

        let report = convert_files(&queue, &options_into(dir_out.path(), EnumConvertMode::Individual))
            .expect("convert");
        assert_eq!(report.warning_count(), 1);
        assert!(report.warnings[0].starts_with("q.csv"));
    }
}
