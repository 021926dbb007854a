//! Frequency aggregation across record files
//!
//! Builds the occurrence map: rsID -> every file name that produced it, one
//! entry per matching line. Files are read in the order given, lines in
//! physical order. Nothing is deduplicated here; a key seen twice in one file
//! gets that file twice.

use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::extract::KeyExtractor;
use crate::record::scan_data_records;
use indexmap::IndexMap;
use std::path::Path;

/// Key -> originating file names, in first-insertion order of the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceMap {
    entries: IndexMap<String, Vec<String>>,
}

impl OccurrenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `file` to the entry for `key`, creating it on first sight.
    pub fn record(&mut self, key: &str, file: &str) {
        match self.entries.get_mut(key) {
            Some(files) => files.push(file.to_string()),
            None => {
                self.entries.insert(key.to_string(), vec![file.to_string()]);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Raw occurrence count (number of (file, line) pairs) for `key`.
    pub fn count(&self, key: &str) -> usize {
        self.entries.get(key).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, files)| (key.as_str(), files.as_slice()))
    }
}

/// Accumulates one occurrence map over a sequence of files.
#[derive(Debug, Default)]
pub struct FrequencyAggregator {
    map: OccurrenceMap,
    extractor: KeyExtractor,
    files_examined: usize,
}

impl FrequencyAggregator {
    /// Aggregator using the rsID pattern strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every data record of `path` and add its matching keys.
    ///
    /// Keys are merged only once the whole file was read, so a file that
    /// fails part-way contributes nothing; earlier files are untouched.
    /// Returns the number of keys taken from this file.
    pub fn ingest_file(&mut self, path: &Path, sink: &mut dyn DiagnosticSink) -> Result<usize> {
        let extractor = self.extractor;
        let mut keys = Vec::new();
        scan_data_records(path, sink, |line, record| {
            if let Some(key) = extractor.extract(record, path, line)? {
                keys.push(key.to_string());
            }
            Ok(())
        })?;

        let name = path.display().to_string();
        for key in &keys {
            self.map.record(key, &name);
        }
        self.files_examined += 1;
        tracing::debug!("{}: {} rsID lines", name, keys.len());
        Ok(keys.len())
    }

    pub fn files_examined(&self) -> usize {
        self.files_examined
    }

    pub fn map(&self) -> &OccurrenceMap {
        &self.map
    }

    pub fn into_map(self) -> OccurrenceMap {
        self.map
    }
}

/// Build an occurrence map from `paths`, stopping at the first fatal error.
pub fn aggregate_files<P: AsRef<Path>>(
    paths: &[P],
    sink: &mut dyn DiagnosticSink,
) -> Result<FrequencyAggregator> {
    let mut aggregator = FrequencyAggregator::new();
    for path in paths {
        aggregator.ingest_file(path.as_ref(), sink)?;
    }
    tracing::info!(
        "aggregated {} distinct rsIDs from {} files",
        aggregator.map().len(),
        aggregator.files_examined()
    );
    Ok(aggregator)
}
