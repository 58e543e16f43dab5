//! NCBI Entrez E-utilities provider
//!
//! `SequenceProvider` is a blocking interface; `LiveFetcher` runs it on the
//! blocking pool. `EntrezClient` is the production implementation.

use crate::config::Settings;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

const TOOL_NAME: &str = "geneticframes";

/// External nucleotide database
pub trait SequenceProvider: Send + Sync {
    /// Record ids matching `query`, best match first (possibly empty)
    fn search(&self, query: &str) -> Result<Vec<String>, ProviderError>;

    /// Raw FASTA text of the record
    fn fetch(&self, id: &str) -> Result<String, ProviderError>;
}

/// Errors talking to the provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to fetch data from URL: {url}. Status: {status}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// Extract the id list from an `esearch` JSON body
pub fn parse_search_response(body: &str) -> Result<Vec<String>, ProviderError> {
    let envelope: SearchEnvelope =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    if let Some(err) = envelope.esearchresult.error {
        return Err(ProviderError::Parse(format!("esearch error: {}", err)));
    }
    Ok(envelope.esearchresult.idlist)
}

/// Join the sequence lines of a FASTA record, skipping `>` header lines
pub fn fasta_body(raw: &str) -> String {
    raw.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('>'))
        .collect()
}

/// Blocking client for the E-utilities `esearch`/`efetch` endpoints
pub struct EntrezClient {
    base_url: String,
    email: String,
    api_key: Option<String>,
    timeout: Duration,
    // built on first use so it is created on a blocking worker thread
    client: OnceLock<Client>,
}

impl EntrezClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            base_url: settings.entrez_base_url.trim_end_matches('/').to_string(),
            email: settings.entrez_email.clone(),
            api_key: settings.entrez_api_key.clone(),
            timeout: settings.fetch_timeout,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&Client, ProviderError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("GeneticFrames/0.1"));
        let built = Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()?;
        Ok(self.client.get_or_init(|| built))
    }

    fn get_text(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("tool", TOOL_NAME));
        query.push(("email", self.email.as_str()));
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.as_str()));
        }
        debug!("GET {} {:?}", url, params);

        let response = self.client()?.get(&url).query(&query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.text()?)
    }
}

impl SequenceProvider for EntrezClient {
    fn search(&self, query: &str) -> Result<Vec<String>, ProviderError> {
        let body = self.get_text(
            "esearch.fcgi",
            &[
                ("db", "nucleotide"),
                ("term", query),
                ("retmax", "1"),
                ("retmode", "json"),
            ],
        )?;
        parse_search_response(&body)
    }

    fn fetch(&self, id: &str) -> Result<String, ProviderError> {
        self.get_text(
            "efetch.fcgi",
            &[
                ("db", "nucleotide"),
                ("id", id),
                ("rettype", "fasta"),
                ("retmode", "text"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_ids() {
        let body = r#"{"header":{"type":"esearch"},"esearchresult":{"count":"42","retmax":"1","idlist":["1877003"]}}"#;
        assert_eq!(parse_search_response(body).unwrap(), vec!["1877003".to_string()]);
    }

    #[test]
    fn test_parse_search_empty() {
        let body = r#"{"esearchresult":{"count":"0","idlist":[]}}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_search_errors() {
        assert!(matches!(
            parse_search_response("<html>busy</html>"),
            Err(ProviderError::Parse(_))
        ));
        let body = r#"{"esearchresult":{"ERROR":"Invalid query"}}"#;
        assert!(matches!(parse_search_response(body), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_fasta_body_strips_headers() {
        let raw = ">NC_010642.1 Panthera tigris mitochondrion, complete genome\nGTTAATGTAG\nCTTAAAACAA\n\n";
        assert_eq!(fasta_body(raw), "GTTAATGTAGCTTAAAACAA");
        assert_eq!(fasta_body(">header only\n"), "");
        assert_eq!(fasta_body(""), "");
    }

    #[test]
    fn test_client_trims_base_url() {
        let settings = Settings {
            entrez_base_url: "http://localhost:9/eutils/".to_string(),
            ..Settings::default()
        };
        let client = EntrezClient::new(&settings);
        assert_eq!(client.base_url, "http://localhost:9/eutils");
    }
}
