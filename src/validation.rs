//! Statistical self-test of the ranking code and the deck's randomness.
//!
//! Random five-card hands are tallied by rank and compared with the exact
//! combinatorial frequencies using a chi-square statistic.

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::cards::{full_pack, Card, Deck, CARDS_PER_PACK};
use crate::error::{PokerError, PokerResult};
use crate::hand_evaluator::{rank_five, HAND_SIZE, NUM_RANKS};

/// Number of distinct five-card hands from one pack, per rank.
pub const PRE_DRAW_FREQUENCIES: [u64; NUM_RANKS] =
    [2_062_860, 337_920, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 36, 4];

/// 52 choose 5.
pub const TOTAL_HANDS: u64 = 2_598_960;

pub const DEFAULT_ITERATIONS: usize = 3_500_000;

const CHUNK_SIZE: usize = 50_000;

#[derive(Debug, Clone, Serialize)]
pub struct ChiSquare {
    pub per_rank: [f64; NUM_RANKS],
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub iterations: usize,
    pub observed: [u64; NUM_RANKS],
    pub expected: [f64; NUM_RANKS],
    pub chi_square: ChiSquare,
}

impl ValidationReport {
    pub fn observed_share(&self) -> [f64; NUM_RANKS] {
        self.observed.map(|o| o as f64 / self.iterations as f64)
    }
}

pub fn theoretical_share() -> [f64; NUM_RANKS] {
    PRE_DRAW_FREQUENCIES.map(|f| f as f64 / TOTAL_HANDS as f64)
}

/// Tallies the ranks of `iterations` random hands sampled from `deck`.
pub fn observed(deck: &Deck, iterations: usize, seed: Option<u64>) -> PokerResult<[u64; NUM_RANKS]> {
    // The known frequencies only describe one full pack.
    if deck.nominal_size() != CARDS_PER_PACK || deck.remaining() != CARDS_PER_PACK {
        return Err(PokerError::InvalidValue(format!(
            "validation needs one full {}-card pack, got {} of {} cards",
            CARDS_PER_PACK,
            deck.remaining(),
            deck.nominal_size()
        )));
    }
    let chunks = iterations.div_ceil(CHUNK_SIZE);
    let counts = (0..chunks)
        .into_par_iter()
        .map(|chunk| -> PokerResult<[u64; NUM_RANKS]> {
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s.wrapping_add(chunk as u64)),
                None => StdRng::from_entropy(),
            };
            let n = CHUNK_SIZE.min(iterations - chunk * CHUNK_SIZE);
            let mut counts = [0u64; NUM_RANKS];
            for _ in 0..n {
                let drawn = deck.sample_with(&mut rng, HAND_SIZE)?;
                let five: [Card; HAND_SIZE] = drawn
                    .try_into()
                    .map_err(|d: Vec<Card>| PokerError::InvalidHandSize(d.len()))?;
                counts[rank_five(&five).index()] += 1;
            }
            Ok(counts)
        })
        .try_reduce(|| [0u64; NUM_RANKS], |a, b| Ok(add_counts(a, b)))?;
    Ok(counts)
}

pub fn expected(iterations: usize) -> [f64; NUM_RANKS] {
    PRE_DRAW_FREQUENCIES.map(|f| iterations as f64 * f as f64 / TOTAL_HANDS as f64)
}

pub fn chi_square(observed: &[u64; NUM_RANKS], expected: &[f64; NUM_RANKS]) -> ChiSquare {
    let per_rank: [f64; NUM_RANKS] = std::array::from_fn(|i| {
        let deviation = observed[i] as f64 - expected[i];
        if expected[i] > 0.0 {
            deviation * deviation / expected[i]
        } else {
            0.0
        }
    });
    ChiSquare {
        per_rank,
        total: per_rank.iter().sum(),
    }
}

pub fn validate(deck: &Deck, iterations: usize, seed: Option<u64>) -> PokerResult<ValidationReport> {
    if iterations == 0 {
        return Err(PokerError::InvalidValue("iterations must be positive".to_string()));
    }
    let observed = observed(deck, iterations, seed)?;
    let expected = expected(iterations);
    let chi_square = chi_square(&observed, &expected);
    debug!(iterations, chi_square = chi_square.total, "validation run");
    Ok(ValidationReport {
        iterations,
        observed,
        expected,
        chi_square,
    })
}

/// Ranks every five-card combination of a single pack.
pub fn exact_frequencies() -> [u64; NUM_RANKS] {
    let pack = full_pack();
    (0..pack.len())
        .into_par_iter()
        .map(|first| {
            let mut counts = [0u64; NUM_RANKS];
            for rest in pack[first + 1..].iter().combinations(HAND_SIZE - 1) {
                let five = [pack[first], *rest[0], *rest[1], *rest[2], *rest[3]];
                counts[rank_five(&five).index()] += 1;
            }
            counts
        })
        .reduce(|| [0u64; NUM_RANKS], add_counts)
}

fn add_counts(a: [u64; NUM_RANKS], b: [u64; NUM_RANKS]) -> [u64; NUM_RANKS] {
    std::array::from_fn(|i| a[i] + b[i])
}
