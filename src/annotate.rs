//! Annotate chromosome/position score files with rsIDs
//!
//! Input layout:
//! ```text
//! #genome_build=GRCh37        <- comments, copied verbatim
//! chr_name  chr_position ...  <- column header (first line starting with "chr")
//! 1         752566       ...  <- data lines
//! ```
//! Output gets an `rsID` column in front. Data lines the lookup could not
//! resolve keep an empty identifier and are repeated as `#` comments at the
//! end of the file. Output is always gzip and lands next to the input as
//! `<stem>_new.txt.gz`.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Result, ScanError};
use crate::lookup::{GenomeBuild, VariantLookup};
use crate::record::{Record, RecordKind};
use crate::source::RecordSource;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const GENOME_BUILD_KEY: &str = "genome_build";
const HEADER_PREFIX: &str = "chr";
const OUTPUT_SUFFIX: &str = "_new.txt.gz";

/// Output path for `input`: `scores.txt.gz` -> `scores_new.txt.gz`.
pub fn annotated_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = [".txt.gz", ".gz", ".txt"]
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name.as_str());
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// Result of annotating one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationReport {
    pub output: PathBuf,
    /// Data lines that received an identifier
    pub annotated: usize,
    /// Data lines the lookup could not resolve
    pub missing: usize,
}

/// Line-by-line annotation state for one file.
pub struct Annotator<'l, L: VariantLookup + ?Sized> {
    path: PathBuf,
    lookup: &'l L,
    build: Option<GenomeBuild>,
    in_data: bool,
    lines: Vec<String>,
    missing: Vec<String>,
    annotated: usize,
}

impl<'l, L: VariantLookup + ?Sized> Annotator<'l, L> {
    pub fn new(path: &Path, lookup: &'l L) -> Self {
        Self {
            path: path.to_path_buf(),
            lookup,
            build: None,
            in_data: false,
            lines: Vec::new(),
            missing: Vec::new(),
            annotated: 0,
        }
    }

    pub fn push_line(
        &mut self,
        line_no: usize,
        raw: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let record = Record::parse(raw);
        match record.kind() {
            RecordKind::Comment => {
                if raw.contains(GENOME_BUILD_KEY) {
                    if let Some((_, value)) = raw.split_once('=') {
                        let build = GenomeBuild::from_header_value(value);
                        tracing::info!(
                            "found genome build {} using {}",
                            value.trim(),
                            build.search_field()
                        );
                        self.build = Some(build);
                    }
                }
                self.lines.push(raw.to_string());
            }
            RecordKind::Blank => sink.report(Diagnostic::blank_line(&self.path, line_no)),
            RecordKind::Data if !self.in_data && record.trimmed().starts_with(HEADER_PREFIX) => {
                self.lines.push(format!("rsID\t{}", raw));
                self.in_data = true;
            }
            RecordKind::Data if !self.in_data => {
                tracing::debug!(
                    "{}:{}: dropping line before column header",
                    self.path.display(),
                    line_no
                );
            }
            RecordKind::Data => self.push_data(line_no, raw, &record, sink)?,
        }
        Ok(())
    }

    fn push_data(
        &mut self,
        line_no: usize,
        raw: &str,
        record: &Record<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let tokens = record.tokens();
        let (chromosome, position) = match tokens {
            [chromosome, position, ..] => (*chromosome, *position),
            _ => {
                return Err(ScanError::MissingColumn {
                    path: self.path.clone(),
                    line: line_no,
                    column: 1,
                    found: tokens.len(),
                })
            }
        };

        let build = match self.build {
            Some(build) => build,
            None => {
                sink.report(Diagnostic::missing_genome_build(&self.path, line_no));
                let build = GenomeBuild::default();
                self.build = Some(build);
                build
            }
        };

        let rs_id = match self.lookup.lookup(chromosome, position, build)? {
            Some(id) => {
                self.annotated += 1;
                id
            }
            None => {
                self.missing.push(raw.to_string());
                String::new()
            }
        };

        let mut fields = Vec::with_capacity(tokens.len() + 1);
        fields.push(rs_id.as_str());
        fields.extend_from_slice(tokens);
        self.lines.push(fields.join("\t"));
        Ok(())
    }

    /// Output lines, unresolved data lines appended as comments.
    pub fn finish(mut self) -> (Vec<String>, usize, usize) {
        let missing = self.missing.len();
        self.lines
            .extend(self.missing.drain(..).map(|line| format!("#{}", line)));
        (self.lines, self.annotated, missing)
    }
}

/// Annotate `path` and write the result to [`annotated_path`].
///
/// Nothing is written unless the whole input was read and every lookup
/// succeeded.
pub fn annotate_file<L: VariantLookup + ?Sized>(
    path: &Path,
    lookup: &L,
    sink: &mut dyn DiagnosticSink,
) -> Result<AnnotationReport> {
    let output = annotated_path(path);
    tracing::debug!("opening {} for in, {} for out", path.display(), output.display());

    let mut annotator = Annotator::new(path, lookup);
    for item in RecordSource::open(path)? {
        let (line_no, raw) = item?;
        annotator.push_line(line_no, &raw, sink)?;
    }
    let (lines, annotated, missing) = annotator.finish();

    write_gzip_lines(&output, &lines)?;
    Ok(AnnotationReport {
        output,
        annotated,
        missing,
    })
}

fn write_gzip_lines(path: &Path, lines: &[String]) -> Result<()> {
    let io_err = |source: std::io::Error| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    for line in lines {
        writeln!(encoder, "{}", line).map_err(io_err)?;
    }
    encoder
        .finish()
        .map_err(io_err)?
        .flush()
        .map_err(io_err)?;
    Ok(())
}
