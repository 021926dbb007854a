//! Record source: line-oriented reading of plain or gzip-compressed files
//!
//! Compression is chosen from the file name (`.gz` suffix), never sniffed from
//! content. A [`RecordSource`] is a single forward pass; reopen the path for
//! another one. The underlying file is closed when the source is dropped,
//! whether the pass finished or stopped on an error.

use crate::error::{Result, ScanError};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read buffer for record files (they are small text files, one record per line)
const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Plain,
    Gzip,
}

impl Compression {
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::Plain,
        }
    }
}

/// Lazy sequence of raw lines from one file.
///
/// Yields `(line_number, text)` with 1-based line numbers and the line
/// terminator removed. Stops after the first decode error.
pub struct RecordSource {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    line: usize,
    failed: bool,
}

impl RecordSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScanError::from_open(path, e))?;
        let compression = Compression::detect(path);
        tracing::debug!("opening {} ({:?})", path.display(), compression);

        let reader: Box<dyn BufRead> = match compression {
            Compression::Gzip => Box::new(BufReader::with_capacity(
                READ_BUFFER_SIZE,
                MultiGzDecoder::new(file),
            )),
            Compression::Plain => Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            line: 0,
            failed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for RecordSource {
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.line += 1;
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with('\n') {
                    buf.pop();
                    if buf.ends_with('\r') {
                        buf.pop();
                    }
                }
                Some(Ok((self.line, buf)))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(ScanError::Decode {
                    path: self.path.clone(),
                    line: self.line,
                    source,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn test_detect_compression() {
        assert_eq!(Compression::detect(Path::new("a.txt.gz")), Compression::Gzip);
        assert_eq!(Compression::detect(Path::new("a.TXT.GZ")), Compression::Gzip);
        assert_eq!(Compression::detect(Path::new("a.txt")), Compression::Plain);
        assert_eq!(Compression::detect(Path::new("gz")), Compression::Plain);
    }

    #[test]
    fn test_plain_and_gzip_lines_match() {
        let dir = tempfile::tempdir().unwrap();
        let text = "# header\nrs1 a\r\n\nrs2 b";

        let plain = dir.path().join("ids.txt");
        std::fs::write(&plain, text).unwrap();

        let gz = dir.path().join("ids.txt.gz");
        let mut enc = GzEncoder::new(File::create(&gz).unwrap(), flate2::Compression::default());
        enc.write_all(text.as_bytes()).unwrap();
        enc.finish().unwrap();

        let from_plain: Vec<_> = RecordSource::open(&plain)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let from_gz: Vec<_> = RecordSource::open(&gz)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        let expected = vec![
            (1, "# header".to_string()),
            (2, "rs1 a".to_string()),
            (3, String::new()),
            (4, "rs2 b".to_string()),
        ];
        assert_eq!(from_plain, expected);
        assert_eq!(from_gz, expected);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordSource::open(dir.path().join("nope.txt")).err().unwrap();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_corrupt_gzip_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt.gz");
        std::fs::write(&path, b"this is not gzip data\n").unwrap();

        let mut source = RecordSource::open(&path).unwrap();
        let first = source.next().unwrap();
        assert!(matches!(first, Err(ScanError::Decode { line: 1, .. })));
        assert!(source.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"rs1 ok\nrs2 \xff\xfe\n").unwrap();

        let results: Vec<_> = RecordSource::open(&path).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ScanError::Decode { line: 2, .. })));
    }
}
