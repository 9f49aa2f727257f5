//! Monte Carlo hold/discard solver.
//!
//! Every one of the 32 ways to keep a subset of the five dealt cards is
//! scored by redrawing the missing cards from the live deck many times and
//! averaging the per-coin payout. The subset with the highest estimate wins;
//! on an exact tie the lowest mask is kept.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, Deck};
use crate::error::{PokerError, PokerResult};
use crate::hand_evaluator::{rank_five, ALL_HAND_RANKS, HAND_SIZE, NUM_RANKS};
use crate::paytable::Paytable;

pub const NUM_HOLDS: usize = 1 << HAND_SIZE;

/// Samples per subset, indexed by the number of cards held. Fewer held cards
/// means a bigger space of redraws, so a bigger budget.
pub const DEFAULT_SAMPLE_SIZES: [usize; HAND_SIZE + 1] = [766_969, 356_730, 64_860, 8_648, 752, 1];

pub const QUICK_SAMPLE_SIZES: [usize; HAND_SIZE + 1] = [20_000, 10_000, 4_000, 1_500, 400, 1];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub sample_sizes: [usize; HAND_SIZE + 1],
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            sample_sizes: DEFAULT_SAMPLE_SIZES,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn quick() -> Self {
        SolverConfig {
            sample_sizes: QUICK_SAMPLE_SIZES,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> PokerResult<()> {
        if let Some(held) = self.sample_sizes.iter().position(|&n| n == 0) {
            return Err(PokerError::InvalidValue(format!(
                "sample size for {} held cards must be positive",
                held
            )));
        }
        Ok(())
    }
}

/// Estimated value of keeping one subset of the dealt hand.
#[derive(Debug, Clone, Serialize)]
pub struct HoldChoice {
    pub mask: u8,
    pub held: Vec<Card>,
    pub expected_value: f64,
    pub samples: usize,
    pub rank_counts: [u64; NUM_RANKS],
}

impl HoldChoice {
    pub fn hold_flags(&self) -> [bool; HAND_SIZE] {
        hold_flags(self.mask)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub hand: Vec<Card>,
    /// All 32 subsets, in mask order.
    pub choices: Vec<HoldChoice>,
    pub best: usize,
}

impl StrategyReport {
    pub fn best(&self) -> &HoldChoice {
        &self.choices[self.best]
    }

    /// Choices ordered by expected value, highest first. Ties keep mask order.
    pub fn ranked(&self) -> Vec<&HoldChoice> {
        let mut ranked: Vec<&HoldChoice> = self.choices.iter().collect();
        ranked.sort_by(|a, b| b.expected_value.total_cmp(&a.expected_value));
        ranked
    }
}

/// Bit `j` set means position `j` is held.
pub fn hold_flags(mask: u8) -> [bool; HAND_SIZE] {
    std::array::from_fn(|j| (mask >> j) & 1 == 1)
}

pub fn mask_from_flags(flags: &[bool]) -> PokerResult<u8> {
    if flags.len() != HAND_SIZE {
        return Err(PokerError::InvalidHoldMask(flags.len()));
    }
    Ok(flags
        .iter()
        .enumerate()
        .fold(0u8, |mask, (j, &held)| if held { mask | (1 << j) } else { mask }))
}

pub fn held_cards(hand: &[Card; HAND_SIZE], mask: u8) -> Vec<Card> {
    hand.iter()
        .enumerate()
        .filter(|&(j, _)| (mask >> j) & 1 == 1)
        .map(|(_, &c)| c)
        .collect()
}

/// Scores one subset by drawing `samples` redraws from `deck`.
///
/// `deck` must hold only the cards still available, i.e. the dealt hand has
/// already been taken out. Holding all five cards needs no sampling.
pub fn evaluate_hold<R: Rng + ?Sized>(
    hand: &[Card; HAND_SIZE],
    mask: u8,
    deck: &Deck,
    paytable: &Paytable,
    samples: usize,
    rng: &mut R,
) -> PokerResult<HoldChoice> {
    if mask as usize >= NUM_HOLDS {
        return Err(PokerError::InvalidValue(format!("hold mask {} out of range", mask)));
    }
    let held = held_cards(hand, mask);
    let k = held.len();
    let pays = ALL_HAND_RANKS.map(|r| paytable.per_coin_at_max_bet(r));

    let mut rank_counts = [0u64; NUM_RANKS];
    let samples = if k == HAND_SIZE { 1 } else { samples.max(1) };

    let mut five = *hand;
    five[..k].copy_from_slice(&held);
    for _ in 0..samples {
        if k < HAND_SIZE {
            let drawn = deck.sample_with(rng, HAND_SIZE - k)?;
            five[k..].copy_from_slice(&drawn);
        }
        rank_counts[rank_five(&five).index()] += 1;
    }

    let total: f64 = rank_counts
        .iter()
        .zip(pays.iter())
        .map(|(&count, &pay)| count as f64 * pay)
        .sum();

    Ok(HoldChoice {
        mask,
        held,
        expected_value: total / samples as f64,
        samples,
        rank_counts,
    })
}

fn worker_rng(seed: Option<u64>, mask: usize) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(mask as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Finds the expected-value-maximising hold for a dealt five-card hand.
///
/// Subsets are scored in parallel, each with its own RNG, and reduced in mask
/// order with a strict comparison so the lowest mask wins exact ties.
pub fn optimal_strategy(
    hand: &[Card],
    deck: &Deck,
    paytable: &Paytable,
    config: &SolverConfig,
) -> PokerResult<StrategyReport> {
    config.validate()?;
    let five: [Card; HAND_SIZE] = hand
        .try_into()
        .map_err(|_| PokerError::InvalidHandSize(hand.len()))?;

    let choices: Vec<HoldChoice> = (0..NUM_HOLDS)
        .into_par_iter()
        .map(|mask| {
            let mut rng = worker_rng(config.seed, mask);
            let k = (mask as u32).count_ones() as usize;
            evaluate_hold(&five, mask as u8, deck, paytable, config.sample_sizes[k], &mut rng)
        })
        .collect::<PokerResult<Vec<_>>>()?;

    let mut best = 0;
    for (i, choice) in choices.iter().enumerate() {
        if choice.expected_value > choices[best].expected_value {
            best = i;
        }
    }

    debug!(
        best_mask = best,
        expected_value = choices[best].expected_value,
        remaining = deck.remaining(),
        "solved hold"
    );

    Ok(StrategyReport {
        hand: five.to_vec(),
        choices,
        best,
    })
}
