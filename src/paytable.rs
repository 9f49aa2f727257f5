use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{PokerError, PokerResult};
use crate::hand_evaluator::{HandRank, NUM_RANKS};

static PAYTABLES_JSON: &str = include_str!("../data/paytables.json");

pub const DEFAULT_PAYTABLE: &str = "jacks-or-better-9-6";

#[derive(Deserialize, Debug)]
struct PaytableFile {
    paytables: Vec<Paytable>,
}

static PAYTABLES: Lazy<Vec<Paytable>> = Lazy::new(|| {
    let file: PaytableFile =
        serde_json::from_str(PAYTABLES_JSON).expect("Failed to parse paytables");
    file.paytables
});

/// Per-coin multipliers indexed by [`HandRank`], plus the royal flush
/// jackpot paid only at the maximum bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paytable {
    pub name: String,
    pub multipliers: [u32; NUM_RANKS],
    pub jackpot: u64,
    pub max_bet: u64,
}

impl Paytable {
    pub fn named(name: &str) -> PokerResult<Paytable> {
        PAYTABLES
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| PokerError::UnknownPaytable(name.to_string()))
    }

    pub fn available() -> Vec<&'static str> {
        PAYTABLES.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn multiplier(&self, rank: HandRank) -> u32 {
        self.multipliers[rank.index()]
    }

    pub fn payout(&self, rank: HandRank, bet: u64) -> u64 {
        if rank == HandRank::RoyalFlush && bet == self.max_bet {
            self.jackpot
        } else {
            u64::from(self.multiplier(rank)) * bet
        }
    }

    /// Return per coin wagered when playing max coins; 800 for a royal on
    /// the standard tables.
    pub fn per_coin_at_max_bet(&self, rank: HandRank) -> f64 {
        self.payout(rank, self.max_bet) as f64 / self.max_bet as f64
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Paytable::named(DEFAULT_PAYTABLE).expect("Default paytable missing")
    }
}
