//! GeneticFrames — genomic fingerprints and art traits for named species
//!
//! A species name becomes a nucleotide sequence (synthesized, or fetched from
//! NCBI through a cache), the sequence becomes composition statistics and a
//! SHA-256 signature, and those become a deterministic set of visual traits.

pub mod acquire;
pub mod analysis;
pub mod art;
pub mod cache;
pub mod config;
pub mod error;
pub mod mutation;
pub mod orchestrator;
pub mod sequence;

pub use acquire::{EntrezClient, LiveFetcher, SequenceAcquirer, SequenceProvider, Synthesizer};
pub use analysis::{GenomicSignature, NucleotideCounts, SequenceAnalysis};
pub use art::{derive_traits, ArtTraits, GeometryStyle, Palette, TextureType};
pub use cache::{CacheStore, MemoryCache, RedisCache};
pub use config::Settings;
pub use error::{GenframesError, Result};
pub use mutation::{mutate, Mutation};
pub use orchestrator::{AnalysisResult, GeneticFrames};
pub use sequence::{Base, Sequence};
