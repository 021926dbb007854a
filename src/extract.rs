//! Key extraction from tokenized records
//!
//! One capability, two strategies:
//! - [`KeyExtractor::Pattern`]: token 0, accepted only when it starts with
//!   `rs` followed by at least one digit. Anything after the digits is
//!   allowed (`rs123_A` is kept as-is). Non-matching records are skipped.
//! - [`KeyExtractor::Positional`]: the token at a zero-based column. A record
//!   that is too short is an error, not a skip.

use crate::error::{Result, ScanError};
use crate::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Anchored at the start only; the remainder of the token is not checked.
static RSID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^rs\d+").unwrap());

/// True when `token` starts with `rs` and one or more digits.
pub fn is_rsid(token: &str) -> bool {
    RSID_PATTERN.is_match(token)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyExtractor {
    #[default]
    Pattern,
    Positional(usize),
}

impl KeyExtractor {
    /// Pull the key out of a data record.
    ///
    /// `Ok(None)` means the record is silently excluded (pattern miss).
    /// `path` and `line` only feed the error for a missing column.
    pub fn extract<'r>(
        &self,
        record: &Record<'r>,
        path: &Path,
        line: usize,
    ) -> Result<Option<&'r str>> {
        let tokens = record.tokens();
        match *self {
            KeyExtractor::Pattern => Ok(tokens.first().copied().filter(|t| is_rsid(t))),
            KeyExtractor::Positional(column) => match tokens.get(column) {
                Some(token) => Ok(Some(*token)),
                None => Err(ScanError::MissingColumn {
                    path: path.to_path_buf(),
                    line,
                    column,
                    found: tokens.len(),
                }),
            },
        }
    }
}
