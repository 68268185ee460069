use std::collections::BTreeMap;
use std::path::PathBuf;

use csvbook_convert::{
    C_MERGED_LABEL_DEFAULT, C_REPORT_PREFIX, ConvertError, EnumConvertMode, ReportConvert,
    SpecConvertOptions, convert_files,
};
use csvbook_io_csv::{Document, SpecFileEntry, SpecFileQueue, clean, clean_document, parse};
use csvbook_io_xlsx::{EnumAutofitColumnsRule, derive_default_xlsx_write_options};
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "csvbook.convert.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "ReportConvert")]
#[derive(Debug, Clone)]
struct PyReportConvert {
    inner: ReportConvert,
}

impl From<ReportConvert> for PyReportConvert {
    fn from(report_convert: ReportConvert) -> Self {
        Self {
            inner: report_convert,
        }
    }
}

#[pymethods]
impl PyReportConvert {
    #[getter]
    fn cnt_files(&self) -> u64 {
        self.inner.cnt_files
    }

    #[getter]
    fn cnt_rows(&self) -> u64 {
        self.inner.cnt_rows
    }

    #[getter]
    fn cnt_sheets(&self) -> u64 {
        self.inner.cnt_sheets
    }

    #[getter]
    fn cnt_workbooks(&self) -> u64 {
        self.inner.cnt_workbooks
    }

    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.inner.warnings.clone()
    }

    #[getter]
    fn warning_count(&self) -> usize {
        self.inner.warning_count()
    }

    #[getter]
    fn files_out(&self) -> Vec<String> {
        self.inner
            .files_out
            .iter()
            .map(|path| path.to_string_lossy().to_string())
            .collect()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.inner.to_dict()
    }

    #[pyo3(signature = (prefix = C_REPORT_PREFIX))]
    fn format(&self, prefix: &str) -> String {
        self.inner.format(prefix)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

fn parse_rule_mode(value: &str) -> PyResult<EnumConvertMode> {
    value.parse().map_err(PyValueError::new_err)
}

fn parse_rule_autofit(value: &str) -> PyResult<EnumAutofitColumnsRule> {
    value.parse().map_err(PyValueError::new_err)
}

fn map_convert_error(exception: ConvertError) -> PyErr {
    if exception.is_io() {
        PyOSError::new_err(exception.to_string())
    } else {
        PyValueError::new_err(exception.to_string())
    }
}

#[pyfunction(name = "parse_csv")]
fn parse_csv_py(text: &str) -> Vec<Vec<String>> {
    parse(text).into_rows()
}

#[pyfunction(name = "clean_cell")]
fn clean_cell_py(cell: &str) -> String {
    clean(cell)
}

#[pyfunction(name = "clean_rows")]
fn clean_rows_py(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    clean_document(Document::new(rows)).into_rows()
}

#[pyfunction(name = "convert_files")]
#[pyo3(signature = (
    paths,
    dir_out,
    mode = "individual",
    merged_label = C_MERGED_LABEL_DEFAULT,
    if_clean = true,
    rule_autofit = "none"
))]
fn convert_files_py(
    py: Python<'_>,
    paths: Vec<String>,
    dir_out: String,
    mode: &str,
    merged_label: &str,
    if_clean: bool,
    rule_autofit: &str,
) -> PyResult<PyReportConvert> {
    let mut write_options = derive_default_xlsx_write_options();
    write_options.policy_autofit.rule_columns = parse_rule_autofit(rule_autofit)?;
    let spec_convert_options = SpecConvertOptions {
        rule_mode: parse_rule_mode(mode)?,
        dir_out: PathBuf::from(dir_out),
        merged_label: merged_label.to_string(),
        if_clean,
        write_options,
        time_merged: None,
    };

    let report_convert = py.allow_threads(|| {
        let mut queue = SpecFileQueue::new();
        for path in &paths {
            queue.add(SpecFileEntry::from_path(path).map_err(ConvertError::from)?);
        }
        convert_files(&queue, &spec_convert_options)
    });
    let report_convert = report_convert.map_err(map_convert_error)?;
    Ok(PyReportConvert::from(report_convert))
}

#[pymodule]
fn _csvbook_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyReportConvert>()?;
    module.add_function(wrap_pyfunction!(parse_csv_py, module)?)?;
    module.add_function(wrap_pyfunction!(clean_cell_py, module)?)?;
    module.add_function(wrap_pyfunction!(clean_rows_py, module)?)?;
    module.add_function(wrap_pyfunction!(convert_files_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
