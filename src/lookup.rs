//! dbSNP identifier lookup
//!
//! Resolves a chromosome/position pair to an rsID through NCBI E-utilities
//! `esearch`. One blocking request per pair, no retry.

use crate::config::LookupConfig;
use crate::error::{Result, ScanError};
use reqwest::blocking::Client;
use serde::Deserialize;

/// Coordinate system of the positions being looked up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenomeBuild {
    /// GRCh37 / hg19: positions are matched against dbSNP's previous build
    Previous,
    /// Anything else: current build positions
    #[default]
    Current,
}

impl GenomeBuild {
    /// Interpret the value of a `genome_build=` header.
    pub fn from_header_value(value: &str) -> Self {
        match value.trim() {
            "GRCh37" | "hg19" => GenomeBuild::Previous,
            _ => GenomeBuild::Current,
        }
    }

    /// dbSNP search field holding the position for this build
    pub fn search_field(self) -> &'static str {
        match self {
            GenomeBuild::Previous => "Base Position Previous",
            GenomeBuild::Current => "Base Position",
        }
    }
}

/// Something that can map a chromosome/position to an identifier.
pub trait VariantLookup {
    /// `Ok(None)` when the database has no matching single-nucleotide variant.
    fn lookup(&self, chromosome: &str, position: &str, build: GenomeBuild)
        -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

#[derive(Debug, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// dbSNP term restricted to non-merged SNVs at one position
pub fn snv_query(chromosome: &str, position: &str, build: GenomeBuild) -> String {
    format!(
        "((({}[Chromosome]) AND {}[{}]) AND \"snv\"[SNP Class]) NOT \"merged rs\"[Filter]",
        chromosome,
        position,
        build.search_field()
    )
}

/// E-utilities client
pub struct EntrezLookup {
    client: Client,
    config: LookupConfig,
}

impl EntrezLookup {
    pub fn new(config: LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScanError::Configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn esearch(&self, term: &str) -> reqwest::Result<EsearchResponse> {
        let url = format!("{}/esearch.fcgi", self.config.base_url.trim_end_matches('/'));
        let mut query = vec![
            ("db", "snp"),
            ("term", term),
            ("sort", "SNP_ID"),
            ("retmax", "20"),
            ("retmode", "json"),
        ];
        if !self.config.email.is_empty() {
            query.push(("email", self.config.email.as_str()));
        }
        if let Some(key) = &self.config.api_key {
            query.push(("api_key", key.as_str()));
        }

        self.client
            .get(url)
            .query(&query)
            .send()?
            .error_for_status()?
            .json()
    }
}

impl VariantLookup for EntrezLookup {
    fn lookup(
        &self,
        chromosome: &str,
        position: &str,
        build: GenomeBuild,
    ) -> Result<Option<String>> {
        let term = snv_query(chromosome, position, build);
        tracing::debug!("sending query '{}'", term);

        let response = self.esearch(&term).map_err(|e| ScanError::Lookup {
            chromosome: chromosome.to_string(),
            position: position.to_string(),
            message: e.to_string(),
        })?;
        let ids = response.esearchresult.idlist;
        tracing::debug!(
            "search for {} and {}[{}] yielded {:?}",
            chromosome,
            position,
            build.search_field(),
            ids
        );
        Ok(ids.first().map(|id| format!("rs{}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_header() {
        assert_eq!(GenomeBuild::from_header_value("GRCh37"), GenomeBuild::Previous);
        assert_eq!(GenomeBuild::from_header_value("hg19 "), GenomeBuild::Previous);
        assert_eq!(GenomeBuild::from_header_value("GRCh38"), GenomeBuild::Current);
        assert_eq!(GenomeBuild::from_header_value("NR"), GenomeBuild::Current);
    }

    #[test]
    fn test_snv_query() {
        assert_eq!(
            snv_query("7", "117559590", GenomeBuild::Previous),
            "(((7[Chromosome]) AND 117559590[Base Position Previous]) AND \"snv\"[SNP Class]) \
             NOT \"merged rs\"[Filter]"
        );
    }

    #[test]
    fn test_parse_esearch_response() {
        let body = r#"{"header":{"type":"esearch"},"esearchresult":{"count":"2","idlist":["113993960","397508256"]}}"#;
        let parsed: EsearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.esearchresult.idlist[0], "113993960");

        let empty = r#"{"esearchresult":{"count":"0"}}"#;
        let parsed: EsearchResponse = serde_json::from_str(empty).unwrap();
        assert!(parsed.esearchresult.idlist.is_empty());
    }
}
