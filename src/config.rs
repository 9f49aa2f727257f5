use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PokerError, PokerResult};
use crate::paytable::{Paytable, DEFAULT_PAYTABLE};
use crate::session::STARTING_BANKROLL;
use crate::solver::SolverConfig;

/// Settings shared by the session, the solver and the simulation commands.
///
/// Every field has a default, so a config file only needs the keys it
/// changes, e.g. `{"num_decks": 2, "solver": {"seed": 7}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_bankroll: u64,
    pub num_decks: usize,
    pub seed: Option<u64>,
    pub paytable: String,
    pub solver: SolverConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_bankroll: STARTING_BANKROLL,
            num_decks: 1,
            seed: None,
            paytable: DEFAULT_PAYTABLE.to_string(),
            solver: SolverConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> PokerResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> PokerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        GameConfig::from_json(&json)
    }

    pub fn validate(&self) -> PokerResult<()> {
        if self.num_decks == 0 {
            return Err(PokerError::InvalidDeckCount(self.num_decks));
        }
        Paytable::named(&self.paytable)?;
        self.solver.validate()
    }

    pub fn paytable(&self) -> PokerResult<Paytable> {
        Paytable::named(&self.paytable)
    }
}
