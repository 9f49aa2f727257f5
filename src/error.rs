use thiserror::Error;

#[derive(Error, Debug)]
pub enum PokerError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid hand notation: {0}")]
    InvalidHandNotation(String),

    #[error("A deck needs at least one 52-card pack, got {0}")]
    InvalidDeckCount(usize),

    #[error("Cannot deal {requested} cards, only {available} remaining")]
    NotEnoughDeck { requested: usize, available: usize },

    #[error("Card {0} is not in the deck")]
    CardNotInDeck(String),

    #[error("Hand must be exactly 5 cards, got {0}")]
    InvalidHandSize(usize),

    #[error("Hand already holds 5 cards")]
    HandOverflow,

    #[error("No card at position {0}")]
    InvalidPosition(usize),

    #[error("Bet must be between 1 and {max}, got {bet}")]
    InvalidBet { bet: u64, max: u64 },

    #[error("Insufficient funds: bet {bet}, bankroll {bankroll}")]
    InsufficientFunds { bet: u64, bankroll: u64 },

    #[error("Hold mask must have 5 entries, got {0}")]
    InvalidHoldMask(usize),

    #[error("Cannot {operation} while {state}")]
    IllegalState {
        operation: &'static str,
        state: String,
    },

    #[error("Unknown paytable: {0}")]
    UnknownPaytable(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type PokerResult<T> = Result<T, PokerError>;
