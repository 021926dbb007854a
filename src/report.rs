//! Output rendering for cross-check summaries and set differences

use crate::summary::Summary;
use std::io::{self, Write};

/// Header row of the tab-delimited table
pub const TABLE_HEADER: &str = "rsID\tcount";

/// Indent in front of each file name in list mode
const FILE_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// `<rsID>: <count>` per key plus a trailing summary line
    #[default]
    Counts,
    /// Counts, each followed by the distinct files holding the key
    List,
    /// `rsID<TAB>count` table, no summary line
    Table,
}

impl OutputMode {
    /// `None` when both list and table are requested.
    pub fn from_flags(list: bool, table: bool) -> Option<Self> {
        match (list, table) {
            (true, true) => None,
            (true, false) => Some(OutputMode::List),
            (false, true) => Some(OutputMode::Table),
            (false, false) => Some(OutputMode::Counts),
        }
    }
}

/// Render a cross-check summary.
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary, mode: OutputMode) -> io::Result<()> {
    if mode == OutputMode::Table {
        writeln!(out, "{}", TABLE_HEADER)?;
    }
    for entry in summary.entries() {
        match mode {
            OutputMode::Table => writeln!(out, "{}\t{}", entry.key, entry.count())?,
            OutputMode::Counts | OutputMode::List => {
                writeln!(out, "{}: {}", entry.key, entry.count())?
            }
        }
        if mode == OutputMode::List {
            for file in entry.distinct_files() {
                writeln!(out, "{}{}", FILE_INDENT, file)?;
            }
        }
    }
    if mode != OutputMode::Table {
        writeln!(
            out,
            "{} rsIDs found across {} files",
            summary.total_keys, summary.files_examined
        )?;
    }
    Ok(())
}

/// One identifier per line.
pub fn write_keys<'a, W, I>(out: &mut W, keys: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a String>,
{
    for key in keys {
        writeln!(out, "{}", key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::OccurrenceMap;
    use crate::summary::{summarize, Threshold};

    fn render(mode: OutputMode) -> String {
        let mut map = OccurrenceMap::new();
        map.record("rs100", "A");
        map.record("rs200", "A");
        map.record("rs100", "B");
        map.record("rs300", "B");
        map.record("rs7", "B");
        map.record("rs7", "B");
        let summary = summarize(&map, Threshold::default(), 2);

        let mut out = Vec::new();
        write_summary(&mut out, &summary, mode).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_flag_conflict() {
        assert_eq!(OutputMode::from_flags(true, true), None);
        assert_eq!(OutputMode::from_flags(false, false), Some(OutputMode::Counts));
    }

    #[test]
    fn test_counts_output() {
        assert_eq!(
            render(OutputMode::Counts),
            "rs100: 2\nrs7: 2\n2 rsIDs found across 2 files\n"
        );
    }

    #[test]
    fn test_list_output_deduplicates_files() {
        assert_eq!(
            render(OutputMode::List),
            "rs100: 2\n    A\n    B\nrs7: 2\n    B\n2 rsIDs found across 2 files\n"
        );
    }

    #[test]
    fn test_table_output_has_no_summary_line() {
        assert_eq!(render(OutputMode::Table), "rsID\tcount\nrs100\t2\nrs7\t2\n");
    }

    #[test]
    fn test_write_keys() {
        let keys: Vec<String> = vec!["a".into(), "c".into()];
        let mut out = Vec::new();
        write_keys(&mut out, &keys).unwrap();
        assert_eq!(out, b"a\nc\n");
    }
}
