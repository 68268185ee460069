//! `csvbook` command-line surface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csvbook_io_xlsx::{EnumAutofitColumnsRule, derive_default_xlsx_write_options};
use tracing::info;

use crate::conf::{C_MERGED_LABEL_DEFAULT, C_PATTERN_INCLUDE_DEFAULT};
use crate::convert::convert_files;
use crate::input::collect_input_queue;
use crate::report::ReportConvert;
use crate::spec::{EnumConvertMode, SpecConvertOptions};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ArgMode {
    /// One workbook per CSV file.
    Individual,
    /// One workbook with one sheet per CSV file.
    Merged,
}

impl From<ArgMode> for EnumConvertMode {
    fn from(value: ArgMode) -> Self {
        match value {
            ArgMode::Individual => EnumConvertMode::Individual,
            ArgMode::Merged => EnumConvertMode::Merged,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ArgAutofit {
    None,
    Header,
    Body,
    All,
}

impl From<ArgAutofit> for EnumAutofitColumnsRule {
    fn from(value: ArgAutofit) -> Self {
        match value {
            ArgAutofit::None => EnumAutofitColumnsRule::None,
            ArgAutofit::Header => EnumAutofitColumnsRule::Header,
            ArgAutofit::Body => EnumAutofitColumnsRule::Body,
            ArgAutofit::All => EnumAutofitColumnsRule::All,
        }
    }
}

/// Convert CSV files into XLSX workbooks whose cells are stored as text.
#[derive(Parser, Debug)]
#[command(name = "csvbook", version)]
pub struct Args {
    /// CSV files or directories (directories are scanned one level deep).
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output layout.
    #[arg(long, value_enum, default_value_t = ArgMode::Individual)]
    pub mode: ArgMode,

    /// Directory receiving the workbooks.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Label appended to the merged workbook file name.
    #[arg(long, default_value = C_MERGED_LABEL_DEFAULT)]
    pub merged_label: String,

    /// Column width inference.
    #[arg(long, value_enum, default_value_t = ArgAutofit::None)]
    pub autofit: ArgAutofit,

    /// Write cells exactly as parsed, without amount cleaning.
    #[arg(long)]
    pub no_clean: bool,

    /// Glob selecting files inside directory inputs (case-insensitive).
    #[arg(long, default_value = C_PATTERN_INCLUDE_DEFAULT)]
    pub include: String,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Translate flags into conversion options.
    pub fn to_convert_options(&self) -> SpecConvertOptions {
        let mut write_options = derive_default_xlsx_write_options();
        write_options.policy_autofit.rule_columns = self.autofit.into();

        SpecConvertOptions {
            rule_mode: self.mode.into(),
            dir_out: self.out_dir.clone(),
            merged_label: self.merged_label.clone(),
            if_clean: !self.no_clean,
            write_options,
            time_merged: None,
        }
    }
}

/// Run one conversion from parsed arguments.
pub fn run(args: &Args) -> Result<ReportConvert> {
    let queue = collect_input_queue(&args.inputs, &args.include)
        .context("failed to collect input files")?;
    info!("{}", queue.label());

    let report = convert_files(&queue, &args.to_convert_options())
        .with_context(|| format!("conversion into {} failed", args.out_dir.display()))?;
    Ok(report)
}
