//! Cross-check tests: library pipeline over real files, plus the CLI

use anyhow::Result;
use assert_cmd::Command;
use flate2::write::GzEncoder;
use predicates::prelude::*;
use rsid_tools::report::{write_summary, OutputMode};
use rsid_tools::{aggregate_files, summarize, Diagnostic, DiagnosticKind, Threshold};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_plain(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_gz(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut enc = GzEncoder::new(File::create(&path).unwrap(), flate2::Compression::default());
    enc.write_all(content.as_bytes()).unwrap();
    enc.finish().unwrap();
    path
}

/// Files A (`rs100 x`, `rs200 y`) and B (`rs100 z`, `rs300 w`), A compressed
fn example_files(dir: &TempDir) -> (PathBuf, PathBuf) {
    let a = write_gz(dir.path(), "A.txt.gz", "rs100 x\nrs200 y\n");
    let b = write_plain(dir.path(), "B.txt", "rs100 z\nrs300 w\n");
    (a, b)
}

fn render(paths: &[PathBuf], threshold: usize, mode: OutputMode) -> Result<String> {
    let mut sink: Vec<Diagnostic> = Vec::new();
    let aggregator = aggregate_files(paths, &mut sink)?;
    let summary = summarize(aggregator.map(), Threshold::new(threshold)?, paths.len());
    let mut out = Vec::new();
    write_summary(&mut out, &summary, mode)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn example_counts_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (a, b) = example_files(&dir);

    let output = render(&[a, b], 2, OutputMode::Counts)?;
    assert_eq!(output, "rs100: 2\n1 rsIDs found across 2 files\n");
    Ok(())
}

#[test]
fn example_table_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (a, b) = example_files(&dir);

    let output = render(&[a, b], 2, OutputMode::Table)?;
    assert_eq!(output, "rsID\tcount\nrs100\t2\n");
    Ok(())
}

#[test]
fn list_output_shows_each_file_once_but_counts_every_line() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let a = write_plain(dir.path(), "a.txt", "rs1 x\nrs1 y\nrs1 z\n");
    let b = write_plain(dir.path(), "b.txt", "rs1 w\n");

    let output = render(&[a.clone(), b.clone()], 2, OutputMode::List)?;
    let expected = format!(
        "rs1: 4\n    {}\n    {}\n1 rsIDs found across 2 files\n",
        a.display(),
        b.display()
    );
    assert_eq!(output, expected);
    Ok(())
}

#[test]
fn blank_lines_warn_but_do_not_stop() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let a = write_plain(dir.path(), "a.txt", "# header\nrs1 x\n\nrs2 y\n");
    let b = write_plain(dir.path(), "b.txt", "rs2 q\n  \nnot_an_id 5\nrs1 r\n");

    let mut sink: Vec<Diagnostic> = Vec::new();
    let aggregator = aggregate_files(&[&a, &b], &mut sink)?;
    assert_eq!(aggregator.map().len(), 2);
    assert!(aggregator.map().get("not_an_id").is_none());

    let found: Vec<_> = sink.iter().map(|d| (d.path.clone(), d.line)).collect();
    assert_eq!(found, vec![(a, 3), (b, 2)]);
    assert!(sink.iter().all(|d| d.kind == DiagnosticKind::BlankLine));
    Ok(())
}

#[test]
fn cli_default_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (a, b) = example_files(&dir);

    Command::cargo_bin("rsid-crosscheck")?
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout("rs100: 2\n1 rsIDs found across 2 files\n");
    Ok(())
}

#[test]
fn cli_table_and_filter() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (a, b) = example_files(&dir);

    Command::cargo_bin("rsid-crosscheck")?
        .args(["--table", "--filter", "1"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout("rsID\tcount\nrs200\t1\nrs300\t1\nrs100\t2\n");
    Ok(())
}

#[test]
fn cli_list_and_table_conflict() -> Result<()> {
    Command::cargo_bin("rsid-crosscheck")?
        .args(["--list", "--table", "no-such-file.txt"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "cannot specify both table and list together",
        ));
    Ok(())
}

#[test]
fn cli_missing_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    Command::cargo_bin("rsid-crosscheck")?
        .arg(dir.path().join("missing.txt.gz"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
    Ok(())
}

#[test]
fn cli_zero_filter_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (a, _) = example_files(&dir);
    Command::cargo_bin("rsid-crosscheck")?
        .args(["-f", "0"])
        .arg(&a)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least 1"));
    Ok(())
}
