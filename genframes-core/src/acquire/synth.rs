//! Deterministic sequence synthesis keyed by species name
//!
//! The generator seed is xxh3-64 over the UTF-8 bytes of the name, so a name
//! maps to the same sequence on every run and every platform.

use crate::sequence::{Base, Sequence};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xxhash_rust::xxh3::xxh3_64;

pub const MIN_LENGTH: usize = 500;
pub const MAX_LENGTH: usize = 2000;

/// Offline sequence source; never performs I/O and never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Stable generator seed for a species name
    pub fn seed_for(species: &str) -> u64 {
        xxh3_64(species.as_bytes())
    }

    /// Normalized draw weights for (A, T, G, C).
    ///
    /// The first two characters nudge the A and T weights; G and C stay at 0.3.
    pub fn weights(species: &str) -> [f64; 4] {
        let mut chars = species.chars();
        let nudge = |c: Option<char>| match c {
            Some(c) => 0.2 + (c as u32 % 5) as f64 / 100.0,
            None => 0.25,
        };
        let raw = [nudge(chars.next()), nudge(chars.next()), 0.3, 0.3];
        let total: f64 = raw.iter().sum();
        raw.map(|w| w / total)
    }

    pub fn synthesize(&self, species: &str) -> Sequence {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(species));
        let length = rng.gen_range(MIN_LENGTH..=MAX_LENGTH);
        let dist = WeightedIndex::new(Self::weights(species))
            .expect("synthesis weights are positive and finite");
        Sequence::from_bases((0..length).map(|_| Base::ALL[dist.sample(&mut rng)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_sequence() {
        let s = Synthesizer::new();
        assert_eq!(s.synthesize("Siberian Tiger"), s.synthesize("Siberian Tiger"));
        assert_eq!(Synthesizer::seed_for("Tiger"), Synthesizer::seed_for("Tiger"));
    }

    #[test]
    fn test_different_names_differ() {
        let s = Synthesizer::new();
        assert_ne!(s.synthesize("Siberian Tiger"), s.synthesize("Jaguar"));
        assert_ne!(Synthesizer::seed_for("Tiger"), Synthesizer::seed_for("tiger"));
    }

    #[test]
    fn test_length_and_alphabet() {
        let s = Synthesizer::new();
        for name in ["Tiger", "Blue Whale", "Axolotl", "Komodo Dragon", "X"] {
            let seq = s.synthesize(name);
            assert!((MIN_LENGTH..=MAX_LENGTH).contains(&seq.len()), "{} -> {}", name, seq.len());
            assert!(seq.as_bytes().iter().all(|b| b"ATGC".contains(b)));
        }
    }

    #[test]
    fn test_weights() {
        // 'T' = 84 -> 0.24, 'i' = 105 -> 0.20
        let w = Synthesizer::weights("Tiger");
        let total = 0.24 + 0.20 + 0.3 + 0.3;
        assert!((w[0] - 0.24 / total).abs() < 1e-12);
        assert!((w[1] - 0.20 / total).abs() < 1e-12);
        assert!((w[2] - 0.3 / total).abs() < 1e-12);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_names_use_default_weight() {
        // 'X' = 88 -> 0.23, missing second char -> 0.25
        let w = Synthesizer::weights("X");
        let total = 0.23 + 0.25 + 0.6;
        assert!((w[1] - 0.25 / total).abs() < 1e-12);

        let empty = Synthesizer::new().synthesize("");
        assert!(!empty.is_empty());
    }
}
