//! Resolve command-line inputs (files and directories) into a file queue.

use std::fs;
use std::path::{Path, PathBuf};

use csvbook_io_csv::{CsvReadError, SpecFileEntry, SpecFileQueue};
use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, warn};

use crate::spec::ConvertError;

/// Compile a case-insensitive basename glob.
pub fn compile_include_pattern(pattern: &str) -> Result<GlobMatcher, ConvertError> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| ConvertError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Build a queue from file and directory inputs.
///
/// Files are queued as given. Directories are scanned one level deep, keeping files whose
/// name matches `pattern_include`, in name order. The queue itself still drops non-CSV
/// names and duplicates; those are logged and skipped.
pub fn collect_input_queue(
    inputs: &[PathBuf],
    pattern_include: &str,
) -> Result<SpecFileQueue, ConvertError> {
    let matcher = compile_include_pattern(pattern_include)?;
    let mut queue = SpecFileQueue::new();

    for path_input in inputs {
        let l_paths = if path_input.is_dir() {
            scan_directory(path_input, &matcher)?
        } else {
            vec![path_input.clone()]
        };
        for path_file in l_paths {
            let entry = SpecFileEntry::from_path(&path_file)?;
            let c_name = entry.name.clone();
            if queue.add(entry) {
                debug!(name = %c_name, "queued input");
            } else {
                warn!(path = %path_file.display(), "skipping input: not a .csv file or already queued");
            }
        }
    }

    Ok(queue)
}

fn scan_directory(dir: &Path, matcher: &GlobMatcher) -> Result<Vec<PathBuf>, ConvertError> {
    let map_io = |source| CsvReadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut l_paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(map_io)? {
        let entry = entry.map_err(map_io)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            l_paths.push(path);
        }
    }
    l_paths.sort();
    Ok(l_paths)
}
