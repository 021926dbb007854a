//! Runtime configuration
//!
//! Values come from the environment, optionally seeded from a `.env` file in
//! the working directory (loaded before clap parses, so `env = "..."` flag
//! fallbacks see it too).

use std::path::PathBuf;
use std::time::Duration;

/// NCBI E-utilities endpoint
pub const DEFAULT_ENTREZ_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Load `.env` if present and return its path. A missing file is not an
/// error; a malformed one is.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Settings for the dbSNP lookup client
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// E-utilities base URL (without trailing `/esearch.fcgi`)
    pub base_url: String,
    /// Contact email NCBI asks tools to send; omitted when empty
    pub email: String,
    /// Raises the NCBI rate limit when present
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENTREZ_BASE_URL.to_string(),
            email: String::new(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl LookupConfig {
    /// Defaults overridden by `ENTREZ_BASE_URL`, `ENTREZ_EMAIL`,
    /// `ENTREZ_API_KEY` and `ENTREZ_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_var("ENTREZ_BASE_URL") {
            config.base_url = url;
        }
        if let Some(email) = non_empty_var("ENTREZ_EMAIL") {
            config.email = email;
        }
        config.api_key = non_empty_var("ENTREZ_API_KEY");
        if let Some(secs) = non_empty_var("ENTREZ_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
