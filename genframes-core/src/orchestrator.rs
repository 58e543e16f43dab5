//! GeneticFrames — species name in, analysis and art traits out
//!
//! acquire → (mutate) → analyze → derive traits → `AnalysisResult`.
//! Owns the acquirer; all I/O happens inside it.

use crate::acquire::SequenceAcquirer;
use crate::analysis::{GenomicSignature, NucleotideCounts, SequenceAnalysis};
use crate::art::{derive_traits, ArtTraits};
use crate::config::Settings;
use crate::error::{GenframesError, Result};
use crate::mutation;
use log::{error, info};
use serde::{Deserialize, Serialize};

/// Everything derived for one species request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub species_name: String,
    pub sequence_length: usize,
    pub gc_content: f64,
    pub nucleotide_counts: NucleotideCounts,
    pub sequence_preview: String,
    pub genomic_signature: GenomicSignature,
    pub art_traits: ArtTraits,
    /// Positions changed by the mutation simulator (0 when none requested)
    pub mutations_applied: usize,
}

pub struct GeneticFrames {
    acquirer: SequenceAcquirer,
}

impl GeneticFrames {
    pub fn new(acquirer: SequenceAcquirer) -> Self {
        Self { acquirer }
    }

    pub async fn from_settings(settings: &Settings) -> Self {
        let acquirer = SequenceAcquirer::from_settings(settings).await;
        info!("GeneticFrames ready ({} mode)", acquirer.mode_name());
        Self::new(acquirer)
    }

    pub fn acquirer(&self) -> &SequenceAcquirer {
        &self.acquirer
    }

    /// Acquire, optionally mutate, and analyze the sequence for `species`.
    ///
    /// `SpeciesNotFound`, `UpstreamConnection` and `InvalidMutationRate`
    /// reach the caller unchanged; anything else becomes `AnalysisFailure`.
    pub async fn acquire_and_analyze(&self, species: &str, mutation_rate: f64) -> Result<AnalysisResult> {
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(GenframesError::InvalidMutationRate(mutation_rate));
        }
        self.run(species, mutation_rate).await.map_err(|e| {
            if !e.is_not_found() && !e.is_retryable() {
                error!("Error analyzing DNA for {}: {}", species, e);
            }
            e.for_species(species)
        })
    }

    async fn run(&self, species: &str, mutation_rate: f64) -> Result<AnalysisResult> {
        let mut sequence = self.acquirer.acquire(species).await?;
        let mut mutations_applied = 0;
        if mutation_rate > 0.0 {
            let mutated = mutation::mutate(&sequence, mutation_rate)?;
            sequence = mutated.sequence;
            mutations_applied = mutated.mutations;
        }

        let analysis = SequenceAnalysis::of(&sequence);
        let art_traits = derive_traits(&sequence, analysis.gc_content, &analysis.signature);

        Ok(AnalysisResult {
            species_name: species.to_string(),
            sequence_length: analysis.length,
            gc_content: analysis.gc_content,
            nucleotide_counts: analysis.counts,
            sequence_preview: analysis.preview,
            genomic_signature: analysis.signature,
            art_traits,
            mutations_applied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::{LiveFetcher, ProviderError, SequenceProvider, MAX_LENGTH, MIN_LENGTH};
    use crate::cache::MemoryCache;
    use std::sync::Arc;
    use std::time::Duration;

    fn simulated() -> GeneticFrames {
        GeneticFrames::new(SequenceAcquirer::simulated())
    }

    struct StaticProvider {
        ids: Vec<String>,
        body: &'static str,
    }

    impl SequenceProvider for StaticProvider {
        fn search(&self, _query: &str) -> std::result::Result<Vec<String>, ProviderError> {
            Ok(self.ids.clone())
        }

        fn fetch(&self, _id: &str) -> std::result::Result<String, ProviderError> {
            Ok(self.body.to_string())
        }
    }

    struct PanickingProvider;

    impl SequenceProvider for PanickingProvider {
        fn search(&self, _query: &str) -> std::result::Result<Vec<String>, ProviderError> {
            panic!("provider bug");
        }

        fn fetch(&self, _id: &str) -> std::result::Result<String, ProviderError> {
            unreachable!()
        }
    }

    fn live(provider: impl SequenceProvider + 'static) -> GeneticFrames {
        GeneticFrames::new(SequenceAcquirer::Live(LiveFetcher::new(
            Arc::new(provider),
            Arc::new(MemoryCache::new()),
            Duration::from_secs(3600),
            Duration::from_secs(5),
        )))
    }

    #[tokio::test]
    async fn test_tiger_scenario() {
        let result = simulated().acquire_and_analyze("Tiger", 0.0).await.unwrap();
        assert_eq!(result.species_name, "Tiger");
        assert!((MIN_LENGTH..=MAX_LENGTH).contains(&result.sequence_length));
        assert_eq!(result.nucleotide_counts.total(), result.sequence_length);
        assert_eq!(result.genomic_signature.as_str().len(), 64);
        assert!(result.genomic_signature.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(result.art_traits.color_palette.len(), 5);
        assert!(result.art_traits.particle_count > 0);
        assert!((0.0..=100.0).contains(&result.gc_content));
        assert!((0.0..=100.0).contains(&result.art_traits.complexity_score));
        assert!(result.sequence_preview.ends_with("..."));
        assert_eq!(result.sequence_preview.len(), 103);
        assert_eq!(result.mutations_applied, 0);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let frames = simulated();
        let a = frames.acquire_and_analyze("Siberian Tiger", 0.0).await.unwrap();
        let b = frames.acquire_and_analyze("Siberian Tiger", 0.0).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_different_species_differ() {
        let frames = simulated();
        let a = frames.acquire_and_analyze("Siberian Tiger", 0.0).await.unwrap();
        let b = frames.acquire_and_analyze("Jaguar", 0.0).await.unwrap();
        assert_ne!(a.genomic_signature, b.genomic_signature);
        assert_ne!(a.art_traits, b.art_traits);
    }

    #[tokio::test]
    async fn test_mutation_changes_signature() {
        let frames = simulated();
        let base = frames.acquire_and_analyze("Blue Whale", 0.0).await.unwrap();
        let mutated = frames.acquire_and_analyze("Blue Whale", 1.0).await.unwrap();
        assert_eq!(mutated.sequence_length, base.sequence_length);
        assert_eq!(mutated.mutations_applied, base.sequence_length);
        assert_ne!(mutated.genomic_signature, base.genomic_signature);
    }

    #[tokio::test]
    async fn test_invalid_rate_passes_through() {
        let err = simulated().acquire_and_analyze("Wolf", 2.0).await.unwrap_err();
        assert!(matches!(err, GenframesError::InvalidMutationRate(_)));
    }

    #[tokio::test]
    async fn test_live_not_found_is_unwrapped() {
        let frames = live(StaticProvider { ids: vec![], body: "" });
        let err = frames.acquire_and_analyze("Nessie", 0.0).await.unwrap_err();
        assert!(matches!(err, GenframesError::SpeciesNotFound(_)));
    }

    #[tokio::test]
    async fn test_live_empty_fetch_is_upstream() {
        let frames = live(StaticProvider {
            ids: vec!["42".into()],
            body: "",
        });
        let err = frames.acquire_and_analyze("Tiger", 0.0).await.unwrap_err();
        assert!(matches!(err, GenframesError::UpstreamConnection(_)));
    }

    #[tokio::test]
    async fn test_live_success() {
        let frames = live(StaticProvider {
            ids: vec!["42".into()],
            body: ">rec\nGGGCCCAAAT\n",
        });
        let result = frames.acquire_and_analyze("Tiger", 0.0).await.unwrap();
        assert_eq!(result.sequence_length, 10);
        assert!((result.gc_content - 60.0).abs() < 1e-9);
        assert_eq!(result.sequence_preview, "GGGCCCAAAT...");
    }

    #[tokio::test]
    async fn test_unexpected_failure_is_wrapped() {
        let err = live(PanickingProvider)
            .acquire_and_analyze("Pangolin", 0.0)
            .await
            .unwrap_err();
        match err {
            GenframesError::AnalysisFailure { species, .. } => assert_eq!(species, "Pangolin"),
            other => panic!("expected AnalysisFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_from_settings_simulated() {
        let frames = GeneticFrames::from_settings(&Settings::simulated()).await;
        assert_eq!(frames.acquirer().mode_name(), "simulated");
    }
}
