use serde::Serialize;
use tracing::debug;

use crate::cards::{Card, Deck};
use crate::error::PokerResult;
use crate::hand_evaluator::HAND_SIZE;
use crate::paytable::Paytable;
use crate::solver::{optimal_strategy, HoldChoice, SolverConfig};

/// A dealt hand and the hold the solver recommends for it.
#[derive(Debug, Clone, Serialize)]
pub struct Playthrough {
    pub dealt: Vec<Card>,
    pub choice: HoldChoice,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaythroughSummary {
    pub plays: usize,
    pub total_expected: f64,
    /// Sum of `EV - 1` over all plays: expected profit per coin wagered.
    pub winnings: f64,
    pub hands: Vec<Playthrough>,
}

impl PlaythroughSummary {
    pub fn return_rate(&self) -> f64 {
        if self.plays == 0 {
            0.0
        } else {
            self.total_expected / self.plays as f64
        }
    }
}

/// Deals one hand, solves it against the rest of the deck, then restores.
pub fn playthrough(deck: &mut Deck, paytable: &Paytable, config: &SolverConfig) -> PokerResult<Playthrough> {
    let dealt = deck.deal(HAND_SIZE)?;
    let report = optimal_strategy(&dealt, deck, paytable, config);
    deck.restore();
    let report = report?;
    Ok(Playthrough {
        dealt,
        choice: report.best().clone(),
    })
}

pub fn run_playthroughs(
    deck: &mut Deck,
    plays: usize,
    paytable: &Paytable,
    config: &SolverConfig,
) -> PokerResult<PlaythroughSummary> {
    let mut summary = PlaythroughSummary::default();
    for i in 0..plays {
        let mut round_config = config.clone();
        if let Some(seed) = config.seed {
            // Distinct seeds per play so solver streams do not repeat.
            round_config.seed = Some(seed.wrapping_add((i as u64) << 8));
        }
        let play = playthrough(deck, paytable, &round_config)?;
        summary.plays += 1;
        summary.total_expected += play.choice.expected_value;
        summary.winnings += play.choice.expected_value - 1.0;
        debug!(play = i, ev = play.choice.expected_value, "playthrough");
        summary.hands.push(play);
    }
    Ok(summary)
}
