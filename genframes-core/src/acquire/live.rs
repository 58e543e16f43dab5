//! Live acquisition from NCBI with cache-aside
//!
//! Hit: return the cached text, no provider call. Miss: search, fetch, strip
//! the FASTA header, write the cache, return. Provider calls run on the
//! blocking pool under a timeout.

use super::entrez::{fasta_body, ProviderError, SequenceProvider};
use crate::cache::{sequence_key, CacheStore};
use crate::error::{GenframesError, Result};
use crate::sequence::Sequence;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

pub struct LiveFetcher {
    provider: Arc<dyn SequenceProvider>,
    cache: Arc<dyn CacheStore>,
    cache_ttl: Duration,
    timeout: Duration,
}

impl LiveFetcher {
    pub fn new(
        provider: Arc<dyn SequenceProvider>,
        cache: Arc<dyn CacheStore>,
        cache_ttl: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            cache_ttl,
            timeout,
        }
    }

    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }

    /// Entrez query restricting results to mitochondrial records
    pub fn search_term(species: &str) -> String {
        format!("{}[Organism] AND mitochondrion[title]", species)
    }

    pub async fn fetch(&self, species: &str) -> Result<Sequence> {
        let key = sequence_key(species);
        if let Some(cached) = self.cache.get(&key).await {
            match Sequence::parse(&cached) {
                Ok(seq) if !seq.is_empty() => {
                    info!("Cache hit for {}", species);
                    return Ok(seq);
                }
                _ => warn!("Discarding unusable cache entry {}", key),
            }
        }

        info!("Searching NCBI for {}...", species);
        let term = Self::search_term(species);
        let ids = self.offload("esearch", move |p| p.search(&term)).await?;
        let Some(id) = ids.into_iter().next() else {
            warn!("No DNA found for {}", species);
            return Err(GenframesError::SpeciesNotFound(species.to_string()));
        };

        info!("Fetching sequence ID {}...", id);
        let raw = self.offload("efetch", move |p| p.fetch(&id)).await?;
        let seq = Sequence::from_fasta_body(&fasta_body(&raw));
        if seq.is_empty() {
            return Err(GenframesError::UpstreamConnection(
                "Empty sequence returned".to_string(),
            ));
        }

        self.cache.set(&key, seq.as_str(), self.cache_ttl).await;
        Ok(seq)
    }

    /// Run a provider call on the blocking pool, bounded by the timeout
    async fn offload<T, F>(&self, label: &'static str, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SequenceProvider) -> std::result::Result<T, ProviderError> + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        let task = tokio::task::spawn_blocking(move || call(provider.as_ref()));
        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(e))) => {
                warn!("NCBI {} error: {}", label, e);
                Err(GenframesError::UpstreamConnection(e.to_string()))
            }
            Ok(Err(join)) => Err(GenframesError::Worker(format!("{}: {}", label, join))),
            Err(_) => {
                warn!("NCBI {} timed out after {:?}", label, self.timeout);
                Err(GenframesError::UpstreamConnection(format!(
                    "{} timed out after {:?}",
                    label, self.timeout
                )))
            }
        }
    }
}
