//! Grouping and filtering of an occurrence map by count
//!
//! Keys whose raw occurrence count reaches the threshold are placed in the
//! bucket for that exact count. Buckets iterate in ascending count order and
//! keep first-seen key order inside a bucket.
//!
//! The displayed count is always the raw count. Only the file list is
//! deduplicated (see [`CountEntry::distinct_files`]).

use crate::aggregate::OccurrenceMap;
use crate::error::{Result, ScanError};
use std::collections::BTreeMap;

/// Default minimum number of occurrences for a key to be reported
pub const DEFAULT_THRESHOLD: usize = 2;

/// Inclusive minimum occurrence count, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(usize);

impl Threshold {
    pub fn new(min: usize) -> Result<Self> {
        if min == 0 {
            return Err(ScanError::Configuration(
                "minimum occurrence threshold must be at least 1".to_string(),
            ));
        }
        Ok(Self(min))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry {
    pub key: String,
    /// Every originating file, duplicates included
    pub files: Vec<String>,
}

impl CountEntry {
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Distinct file names in first-seen order.
    pub fn distinct_files(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for file in &self.files {
            if !seen.contains(&file.as_str()) {
                seen.push(file);
            }
        }
        seen
    }
}

/// Count -> entries having exactly that count.
pub type CountGroups = BTreeMap<usize, Vec<CountEntry>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub groups: CountGroups,
    /// Number of keys that passed the threshold
    pub total_keys: usize,
    /// Number of input files examined
    pub files_examined: usize,
}

impl Summary {
    /// Entries in output order: ascending count, then first-seen.
    pub fn entries(&self) -> impl Iterator<Item = &CountEntry> {
        self.groups.values().flatten()
    }
}

/// Bucket every key of `map` whose count is at least `threshold`.
pub fn summarize(map: &OccurrenceMap, threshold: Threshold, files_examined: usize) -> Summary {
    let mut groups = CountGroups::new();
    let mut total_keys = 0;
    for (key, files) in map.iter() {
        if files.len() < threshold.get() {
            continue;
        }
        groups.entry(files.len()).or_default().push(CountEntry {
            key: key.to_string(),
            files: files.to_vec(),
        });
        total_keys += 1;
    }
    Summary {
        groups,
        total_keys,
        files_examined,
    }
}
