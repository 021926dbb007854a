//! Line tokenizer
//!
//! Every raw line becomes a [`Record`]: trimmed, classified as comment, blank
//! or data, and (for data) split on runs of whitespace. [`scan_data_records`]
//! drives a whole file through the tokenizer and is the plumbing shared by the
//! aggregation and set-difference passes.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::Result;
use crate::source::RecordSource;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Comment,
    Blank,
    Data,
}

/// One logical line. Borrowed from the line buffer and dropped right after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    raw: &'a str,
    trimmed: &'a str,
    kind: RecordKind,
    tokens: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        let (kind, tokens) = if trimmed.starts_with('#') {
            (RecordKind::Comment, Vec::new())
        } else if trimmed.is_empty() {
            (RecordKind::Blank, Vec::new())
        } else {
            (RecordKind::Data, trimmed.split_whitespace().collect())
        };
        Self {
            raw,
            trimmed,
            kind,
            tokens,
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn trimmed(&self) -> &'a str {
        self.trimmed
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn is_data(&self) -> bool {
        self.kind == RecordKind::Data
    }

    /// Whitespace-delimited fields; empty unless the record is data.
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }
}

/// Open `path` and call `visit(line_number, record)` for every data record.
///
/// Comments are skipped. Blank lines are reported to `sink` and skipped.
/// Returns the number of data records visited. The first error from the
/// source or from `visit` ends the pass.
pub fn scan_data_records<F>(
    path: &Path,
    sink: &mut dyn DiagnosticSink,
    mut visit: F,
) -> Result<usize>
where
    F: FnMut(usize, &Record<'_>) -> Result<()>,
{
    let source = RecordSource::open(path)?;
    let mut visited = 0;
    for item in source {
        let (line_no, text) = item?;
        let record = Record::parse(&text);
        match record.kind() {
            RecordKind::Comment => {}
            RecordKind::Blank => sink.report(Diagnostic::blank_line(path, line_no)),
            RecordKind::Data => {
                visit(line_no, &record)?;
                visited += 1;
            }
        }
    }
    Ok(visited)
}
