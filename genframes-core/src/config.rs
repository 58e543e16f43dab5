//! Process settings
//!
//! Built explicitly by the entry point and handed to the orchestrator.
//! `from_env` reads the same variable names the web service deploys with.

use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENTREZ_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Configuration for sequence acquisition and caching
#[derive(Debug, Clone)]
pub struct Settings {
    /// Fetch real sequences from NCBI instead of synthesizing them
    pub live_mode: bool,
    /// Contact address NCBI requires on every E-utilities request
    pub entrez_email: String,
    /// Optional NCBI API key (raises the rate limit)
    pub entrez_api_key: Option<String>,
    /// Base URL of the E-utilities endpoints
    pub entrez_base_url: String,
    /// Upper bound on a single search or fetch call
    pub fetch_timeout: Duration,
    /// Use Redis as the sequence cache
    pub redis_enabled: bool,
    pub redis_url: String,
    /// TTL applied to cached sequences
    pub cache_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            live_mode: false,
            entrez_email: "geneticframes@example.org".to_string(),
            entrez_api_key: None,
            entrez_base_url: DEFAULT_ENTREZ_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(30),
            redis_enabled: false,
            redis_url: "redis://localhost:6379/0".to_string(),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl Settings {
    /// Settings for deterministic, offline operation
    pub fn simulated() -> Self {
        Self::default()
    }

    /// Settings for live NCBI fetching with the given contact email
    pub fn live(entrez_email: impl Into<String>) -> Self {
        Self {
            live_mode: true,
            entrez_email: entrez_email.into(),
            ..Self::default()
        }
    }

    /// Overlay environment variables on the defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            live_mode: parse_or("NCBI_LIVE_MODE", lookup("NCBI_LIVE_MODE"), defaults.live_mode),
            entrez_email: lookup("ENTREZ_EMAIL").unwrap_or(defaults.entrez_email),
            entrez_api_key: lookup("ENTREZ_API_KEY").filter(|k| !k.is_empty()),
            entrez_base_url: lookup("ENTREZ_BASE_URL").unwrap_or(defaults.entrez_base_url),
            fetch_timeout: Duration::from_secs(parse_or(
                "NCBI_TIMEOUT_SECONDS",
                lookup("NCBI_TIMEOUT_SECONDS"),
                defaults.fetch_timeout.as_secs(),
            )),
            redis_enabled: parse_or("REDIS_ENABLED", lookup("REDIS_ENABLED"), defaults.redis_enabled),
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_ttl: Duration::from_secs(parse_or(
                "CACHE_TTL_SECONDS",
                lookup("CACHE_TTL_SECONDS"),
                defaults.cache_ttl.as_secs(),
            )),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => match value.trim().to_ascii_lowercase().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Ignoring unparseable {}={:?}, using default", key, value);
                default
            }
        },
    }
}
