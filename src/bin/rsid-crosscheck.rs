//! rsid-crosscheck CLI tool
//!
//! Reports which rsIDs occur in more than one score file.
//!
//! Usage:
//!   rsid-crosscheck [--list | --table] [--filter NUM] FILE...

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rsid_tools::config::load_dotenv;
use rsid_tools::report::{write_summary, OutputMode};
use rsid_tools::summary::DEFAULT_THRESHOLD;
use rsid_tools::{aggregate_files, summarize, LogSink, Threshold};

#[derive(Parser)]
#[command(name = "rsid-crosscheck")]
#[command(about = "Tool to cross check which rsIDs occur in different score files")]
struct Cli {
    /// List the files the rsID is found in as well as count
    #[arg(short, long)]
    list: bool,

    /// Print results as a tab delimited table for easier ingestion to other tools
    #[arg(short, long)]
    table: bool,

    /// Only report rsIDs seen at least this many times
    #[arg(short, long, value_name = "NUM", default_value_t = DEFAULT_THRESHOLD, env = "RSID_FILTER")]
    filter: usize,

    /// Files to search for rsIDs (plain text or .gz)
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let env_file = load_dotenv().context("Failed to load .env")?;
    let cli = Cli::parse();
    rsid_tools::init("warn");
    if let Some(path) = env_file {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let Some(mode) = OutputMode::from_flags(cli.list, cli.table) else {
        bail!("cannot specify both table and list together");
    };
    let threshold = Threshold::new(cli.filter)?;

    let mut sink = LogSink::new();
    let aggregator = aggregate_files(&cli.files, &mut sink)?;
    let summary = summarize(aggregator.map(), threshold, cli.files.len());
    if sink.reported() > 0 {
        tracing::info!("{} blank line(s) skipped", sink.reported());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_summary(&mut out, &summary, mode).context("Failed to write results")?;
    out.flush().context("Failed to write results")?;

    Ok(())
}
