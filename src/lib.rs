//! rsid-tools - cross-referencing identifier columns across record files
//!
//! The library behind three small command-line tools:
//! - `rsid-crosscheck`: which rsIDs occur in several score files, and how often
//! - `id-difference`: identifiers present in one group of files but not another
//! - `add-rsids`: fill in rsIDs for chromosome/position files via dbSNP
//!
//! Input files are whitespace-tokenized text, one record per line, optionally
//! gzip-compressed (detected by the `.gz` suffix). Lines starting with `#` are
//! comments.

pub mod aggregate;
pub mod annotate;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod record;
pub mod report;
pub mod set_ops;
pub mod source;
pub mod summary;

pub use aggregate::{aggregate_files, FrequencyAggregator, OccurrenceMap};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, LogSink};
pub use error::{Result, ScanError};
pub use extract::KeyExtractor;
pub use set_ops::{difference, FileGroup, KeySet};
pub use summary::{summarize, CountEntry, Summary, Threshold};

use tracing_subscriber::EnvFilter;

/// Install the stderr logger used by the command-line tools
///
/// Filtered by `RUST_LOG`, falling back to `default_level`. Calling it again
/// is a no-op.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
