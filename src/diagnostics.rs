//! Non-fatal diagnostics
//!
//! Blank data lines and similar conditions never abort a pass. They are handed
//! to a [`DiagnosticSink`] supplied by the caller: the CLI tools log them,
//! tests collect them into a `Vec` and assert on it.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Line was empty after trimming
    BlankLine,
    /// Annotation reached data lines without a `genome_build` header
    MissingGenomeBuild,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: PathBuf,
    /// 1-based physical line number
    pub line: usize,
}

impl Diagnostic {
    pub fn blank_line(path: &Path, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::BlankLine,
            path: path.to_path_buf(),
            line,
        }
    }

    pub fn missing_genome_build(path: &Path, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::MissingGenomeBuild,
            path: path.to_path_buf(),
            line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::BlankLine => {
                write!(f, "{}:{}: blank line skipped", self.path.display(), self.line)
            }
            DiagnosticKind::MissingGenomeBuild => write!(
                f,
                "{}:{}: no genome_build header before data, assuming current coordinates",
                self.path.display(),
                self.line
            ),
        }
    }
}

/// Receiver for non-fatal diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that forwards every diagnostic to `tracing::warn!` and keeps a count.
#[derive(Debug, Default)]
pub struct LogSink {
    reported: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        tracing::warn!("{}", diagnostic);
    }
}
