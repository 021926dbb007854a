//! id-difference CLI tool
//!
//! Identify the set of ids in the base files that never appear in the
//! removed files.
//!
//! Usage:
//!   id-difference --base FILE... --removed FILE... [--col N] [--base-col N]
//!                 [--removed-col N] [--output FILE]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rsid_tools::config::load_dotenv;
use rsid_tools::report::write_keys;
use rsid_tools::{difference, FileGroup, LogSink};

#[derive(Parser)]
#[command(name = "id-difference")]
#[command(about = "Identify set of items in first set of files not in second set of files")]
struct Cli {
    /// Files containing all the available ids
    #[arg(short, long, value_name = "BASE-FILE", num_args = 1..)]
    base: Vec<PathBuf>,

    /// Files containing rejected/unused ids
    #[arg(short, long, value_name = "REMOVED-FILE", num_args = 1..)]
    removed: Vec<PathBuf>,

    /// Column to use for both types of file (zero-based)
    #[arg(short, long, default_value_t = 0)]
    col: usize,

    /// Column to use for the base files (overrides --col)
    #[arg(long)]
    base_col: Option<usize>,

    /// Column to use for the removed files (overrides --col)
    #[arg(long)]
    removed_col: Option<usize>,

    /// Output filename (default: standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env_file = load_dotenv().context("Failed to load .env")?;
    let cli = Cli::parse();
    rsid_tools::init("warn");
    if let Some(path) = env_file {
        tracing::debug!("loaded environment from {}", path.display());
    }

    if cli.base.is_empty() {
        bail!("usage: must supply one or more base files");
    }
    if cli.removed.is_empty() {
        bail!("usage: must supply one or more removed files");
    }

    let base = FileGroup::new(cli.base, cli.base_col.unwrap_or(cli.col));
    let removed = FileGroup::new(cli.removed, cli.removed_col.unwrap_or(cli.col));

    let mut sink = LogSink::new();
    let unused = difference(&base, &removed, &mut sink)?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);
    write_keys(&mut out, &unused).context("Failed to write results")?;
    out.flush().context("Failed to write results")?;

    Ok(())
}
