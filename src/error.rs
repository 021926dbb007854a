//! Error taxonomy for record scanning, aggregation and set algebra
//!
//! Recoverable conditions (blank lines, identifiers that do not match the
//! pattern) never show up here; they are either diagnostics or silently
//! skipped. Everything in [`ScanError`] is fatal for the pass that raised it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// A named input file does not exist
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be opened or created
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Compressed content could not be inflated, or text is not valid UTF-8
    #[error("failed to decode {} at line {line}: {source}", path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A data record is shorter than the configured column index
    #[error(
        "{}:{line}: column {column} requested but record has only {found} field(s)",
        path.display()
    )]
    MissingColumn {
        path: PathBuf,
        line: usize,
        column: usize,
        found: usize,
    },

    /// Caller supplied an unusable configuration (empty file group, zero threshold, ...)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The identifier lookup collaborator failed
    #[error("lookup of {chromosome}:{position} failed: {message}")]
    Lookup {
        chromosome: String,
        position: String,
        message: String,
    },
}

impl ScanError {
    /// Classify an error raised while opening `path`.
    pub(crate) fn from_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            ScanError::NotFound { path }
        } else {
            ScanError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_classification() {
        let missing = ScanError::from_open("a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, ScanError::NotFound { .. }));

        let denied =
            ScanError::from_open("a.txt", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, ScanError::Io { .. }));
    }

    #[test]
    fn test_missing_column_message() {
        let err = ScanError::MissingColumn {
            path: PathBuf::from("ids.txt"),
            line: 7,
            column: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "ids.txt:7: column 3 requested but record has only 2 field(s)"
        );
    }
}
