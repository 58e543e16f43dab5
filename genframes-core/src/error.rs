//! Error taxonomy for GeneticFrames
//!
//! Only three kinds reach a caller of the analysis pipeline: the species
//! could not be found upstream, the upstream could not be reached, or
//! something else went wrong while analyzing a named species.

/// Errors produced by the GeneticFrames core
#[derive(Debug, thiserror::Error)]
pub enum GenframesError {
    /// The external search returned no candidate record
    #[error("Species '{0}' not found.")]
    SpeciesNotFound(String),

    /// Transport failure, timeout, unparseable or empty upstream response
    #[error("Failed to connect to NCBI services. Details: {0}")]
    UpstreamConnection(String),

    /// Any other failure while acquiring or deriving, tagged with the species
    #[error("Could not analyze species: {species}")]
    AnalysisFailure {
        species: String,
        #[source]
        source: Box<GenframesError>,
    },

    #[error("Invalid mutation rate {0}: must be within [0, 1]")]
    InvalidMutationRate(f64),

    #[error("Error parsing DNA sequence. Details: {0}")]
    InvalidSequence(String),

    /// A blocking worker task panicked or was cancelled
    #[error("Worker task failed: {0}")]
    Worker(String),
}

impl GenframesError {
    /// Wrap an unexpected error with the species it occurred for.
    ///
    /// Not-found, upstream and rate errors pass through unchanged.
    pub fn for_species(self, species: &str) -> Self {
        match self {
            Self::SpeciesNotFound(_)
            | Self::UpstreamConnection(_)
            | Self::InvalidMutationRate(_)
            | Self::AnalysisFailure { .. } => self,
            other => Self::AnalysisFailure {
                species: species.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Whether a caller may reasonably retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamConnection(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SpeciesNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, GenframesError>;
