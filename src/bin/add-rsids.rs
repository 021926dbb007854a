//! add-rsids CLI tool
//!
//! Retrieve the rsIDs from the dbSNP database for chromosome names and
//! positions. Each `NAME.txt.gz` is written out as `NAME_new.txt.gz`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rsid_tools::annotate::annotate_file;
use rsid_tools::config::{load_dotenv, LookupConfig};
use rsid_tools::lookup::EntrezLookup;
use rsid_tools::LogSink;

#[derive(Parser)]
#[command(name = "add-rsids")]
#[command(about = "Retrieve the rs IDs from the SNP database for chromosome names and positions")]
struct Cli {
    /// Explain what is happening when running
    #[arg(short, long)]
    verbose: bool,

    /// Contact email sent to NCBI with each request
    #[arg(long, env = "ENTREZ_EMAIL")]
    email: Option<String>,

    /// NCBI API key (raises the request rate limit)
    #[arg(long, env = "ENTREZ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Files that need processing, new files will insert '_new' before txt.gz
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let env_file = load_dotenv().context("Failed to load .env")?;
    let cli = Cli::parse();
    rsid_tools::init(if cli.verbose { "debug" } else { "info" });
    if let Some(path) = env_file {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let mut config = LookupConfig::from_env();
    if let Some(email) = cli.email {
        config.email = email;
    }
    if cli.api_key.is_some() {
        config.api_key = cli.api_key;
    }
    let lookup = EntrezLookup::new(config)?;

    let mut sink = LogSink::new();
    for file in &cli.files {
        let report = annotate_file(file, &lookup, &mut sink)
            .with_context(|| format!("Failed to annotate {}", file.display()))?;
        println!("Number of missing rsIDs {}", report.missing);
        tracing::info!(
            "{}: {} annotated, written to {}",
            file.display(),
            report.annotated,
            report.output.display()
        );
    }

    Ok(())
}
