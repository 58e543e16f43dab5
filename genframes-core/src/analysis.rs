//! SequenceAnalyzer — composition, signature and complexity of a sequence
//!
//! Everything here is a pure function of the sequence bytes.

use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

/// Number of symbols kept in the preview before the marker
pub const PREVIEW_LEN: usize = 100;
pub const PREVIEW_MARKER: &str = "...";
/// k-mer length used for the complexity score
pub const KMER_LEN: usize = 3;

/// Exact per-base counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucleotideCounts {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "T")]
    pub t: usize,
    #[serde(rename = "G")]
    pub g: usize,
    #[serde(rename = "C")]
    pub c: usize,
}

impl NucleotideCounts {
    pub fn of(seq: &Sequence) -> Self {
        let mut counts = Self::default();
        for byte in seq.as_bytes() {
            match byte {
                b'A' => counts.a += 1,
                b'T' => counts.t += 1,
                b'G' => counts.g += 1,
                b'C' => counts.c += 1,
                _ => {}
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.a + self.t + self.g + self.c
    }

    /// (G + C) / total × 100, or 0 for an empty sequence
    pub fn gc_content(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.g + self.c) as f64 / total as f64 * 100.0
    }
}

/// SHA-256 of the sequence bytes, 64 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenomicSignature(String);

impl GenomicSignature {
    pub fn of(seq: &Sequence) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seq.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap an externally supplied digest
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading 8 hex digits as an integer; 0 if absent or malformed
    pub fn prefix_u32(&self) -> u32 {
        self.0
            .get(..8)
            .and_then(|p| u32::from_str_radix(p, 16).ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for GenomicSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First 100 symbols followed by the marker, whether or not anything was cut
pub fn preview(seq: &Sequence) -> String {
    let head = &seq.as_str()[..seq.len().min(PREVIEW_LEN)];
    format!("{}{}", head, PREVIEW_MARKER)
}

/// Distinct 3-mers over every sliding window, / length × 200, clamped to [0, 100]
pub fn complexity_score(seq: &Sequence) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&[u8]> = seq.as_bytes().windows(KMER_LEN).collect();
    let score = distinct.len() as f64 / seq.len() as f64 * 200.0;
    score.clamp(0.0, 100.0)
}

/// Full analysis of one sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceAnalysis {
    pub length: usize,
    pub counts: NucleotideCounts,
    pub gc_content: f64,
    pub signature: GenomicSignature,
    pub preview: String,
}

impl SequenceAnalysis {
    pub fn of(seq: &Sequence) -> Self {
        let counts = NucleotideCounts::of(seq);
        Self {
            length: seq.len(),
            gc_content: counts.gc_content(),
            counts,
            signature: GenomicSignature::of(seq),
            preview: preview(seq),
        }
    }
}
