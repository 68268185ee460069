//! Input file queue with suffix filtering and (name, size) de-duplication.

use std::fs;
use std::path::{Path, PathBuf};

use crate::conf::C_SUFFIX_CSV;
use crate::spec::CsvReadError;

/// One queued input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileEntry {
    /// File name shown to the user and used to derive output names.
    pub name: String,
    /// Location the text is read from.
    pub path: PathBuf,
    /// Size in bytes; part of the de-duplication key.
    pub size: u64,
}

impl SpecFileEntry {
    /// Build an entry from file metadata.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CsvReadError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|source| CsvReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: meta.len(),
        })
    }

    /// Whether the name carries the `.csv` suffix (any case).
    pub fn is_csv(&self) -> bool {
        self.name.to_lowercase().ends_with(C_SUFFIX_CSV)
    }
}

/// Ordered set of files waiting for conversion.
#[derive(Debug, Clone, Default)]
pub struct SpecFileQueue {
    l_entries: Vec<SpecFileEntry>,
}

impl SpecFileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one file. Non-CSV names and already queued (name, size) pairs are ignored.
    ///
    /// Returns `true` when the entry was appended.
    pub fn add(&mut self, entry: SpecFileEntry) -> bool {
        if !entry.is_csv() {
            return false;
        }
        if self
            .l_entries
            .iter()
            .any(|queued| queued.name == entry.name && queued.size == entry.size)
        {
            return false;
        }
        self.l_entries.push(entry);
        true
    }

    /// Queue many files; returns how many were appended.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = SpecFileEntry>) -> usize {
        entries
            .into_iter()
            .map(|entry| self.add(entry))
            .filter(|if_added| *if_added)
            .count()
    }

    /// Remove by position. Out-of-range indices leave the queue untouched.
    pub fn remove(&mut self, index: usize) -> Option<SpecFileEntry> {
        if index < self.l_entries.len() {
            Some(self.l_entries.remove(index))
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.l_entries.clear();
    }

    pub fn entries(&self) -> &[SpecFileEntry] {
        &self.l_entries
    }

    pub fn len(&self) -> usize {
        self.l_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l_entries.is_empty()
    }

    /// Conversion can start only with at least one queued file.
    pub fn is_convertible(&self) -> bool {
        !self.is_empty()
    }

    /// Action label reflecting the queue size.
    pub fn label(&self) -> String {
        match self.len() {
            0 => "Convert".to_string(),
            1 => "Convert 1 file".to_string(),
            n => format!("Convert {n} files"),
        }
    }
}
