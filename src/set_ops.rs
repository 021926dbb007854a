//! Set difference between two file groups
//!
//! Each group is an ordered list of files read with its own column index.
//! The result is every key of the base group that never appears in the
//! removed group. Keys are kept in a `BTreeSet`, so results come out sorted.

use crate::diagnostics::DiagnosticSink;
use crate::error::{Result, ScanError};
use crate::extract::KeyExtractor;
use crate::record::scan_data_records;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub type KeySet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub files: Vec<PathBuf>,
    /// Zero-based column holding the key
    pub column: usize,
}

impl FileGroup {
    pub fn new<P: Into<PathBuf>>(files: impl IntoIterator<Item = P>, column: usize) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            column,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Distinct keys found at `column` across every data record of the group.
    pub fn key_set(&self, sink: &mut dyn DiagnosticSink) -> Result<KeySet> {
        let mut keys = KeySet::new();
        for path in &self.files {
            collect_keys(path, self.column, &mut keys, sink)?;
        }
        Ok(keys)
    }
}

fn collect_keys(
    path: &Path,
    column: usize,
    keys: &mut KeySet,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let extractor = KeyExtractor::Positional(column);
    let records = scan_data_records(path, sink, |line, record| {
        if let Some(key) = extractor.extract(record, path, line)? {
            if !keys.contains(key) {
                keys.insert(key.to_string());
            }
        }
        Ok(())
    })?;
    tracing::debug!("{}: {} records read at column {}", path.display(), records, column);
    Ok(())
}

/// `base - removed`, membership by exact string equality.
pub fn difference(
    base: &FileGroup,
    removed: &FileGroup,
    sink: &mut dyn DiagnosticSink,
) -> Result<KeySet> {
    if base.is_empty() {
        return Err(ScanError::Configuration(
            "must supply one or more base files".to_string(),
        ));
    }
    if removed.is_empty() {
        return Err(ScanError::Configuration(
            "must supply one or more removed files".to_string(),
        ));
    }

    let base_keys = base.key_set(sink)?;
    let removed_keys = removed.key_set(sink)?;
    let unused: KeySet = base_keys.difference(&removed_keys).cloned().collect();
    tracing::info!(
        "{} base ids, {} removed ids, {} unused",
        base_keys.len(),
        removed_keys.len(),
        unused.len()
    );
    Ok(unused)
}
