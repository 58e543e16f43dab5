//! MutationSimulator — independent per-base substitution
//!
//! Each position is mutated with probability `rate`; a mutated base always
//! becomes one of the other three, chosen uniformly.

use crate::error::{GenframesError, Result};
use crate::sequence::{Base, Sequence};
use log::info;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A mutated sequence and how many positions changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub sequence: Sequence,
    pub mutations: usize,
}

fn check_rate(rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(GenframesError::InvalidMutationRate(rate))
    }
}

fn mutate_base<R: Rng + ?Sized>(base: Base, rate: f64, rng: &mut R) -> (Base, bool) {
    if rng.gen::<f64>() < rate {
        let others = base.others();
        (others[rng.gen_range(0..others.len())], true)
    } else {
        (base, false)
    }
}

/// Mutate every position in parallel using per-worker thread RNGs
pub fn mutate(seq: &Sequence, rate: f64) -> Result<Mutation> {
    check_rate(rate)?;
    let bases: Vec<Base> = seq.bases().collect();
    let mutated: Vec<(Base, bool)> = bases
        .par_iter()
        .map_init(rand::thread_rng, |rng, &base| mutate_base(base, rate, rng))
        .collect();
    let mutations = mutated.iter().filter(|(_, changed)| *changed).count();
    info!("Simulated {} mutations (Rate: {})", mutations, rate);
    Ok(Mutation {
        sequence: Sequence::from_bases(mutated.into_iter().map(|(b, _)| b)),
        mutations,
    })
}

/// Sequential variant driven by a caller-supplied RNG, for reproducible runs
pub fn mutate_with<R: Rng + ?Sized>(seq: &Sequence, rate: f64, rng: &mut R) -> Result<Mutation> {
    check_rate(rate)?;
    let mut mutations = 0;
    let mut out = Vec::with_capacity(seq.len());
    for base in seq.bases() {
        let (next, changed) = mutate_base(base, rate, rng);
        mutations += changed as usize;
        out.push(next);
    }
    Ok(Mutation {
        sequence: Sequence::from_bases(out),
        mutations,
    })
}
