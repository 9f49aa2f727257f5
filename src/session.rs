use std::fmt;

use tracing::{debug, info, warn};

use crate::cards::{Card, Deck};
use crate::config::GameConfig;
use crate::error::{PokerError, PokerResult};
use crate::hand::Hand;
use crate::hand_evaluator::{rank_hand, HandRank, HAND_SIZE};
use crate::paytable::Paytable;

pub const STARTING_BANKROLL: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingBet,
    AwaitingHold,
    AwaitingPayout,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::AwaitingBet => write!(f, "awaiting bet"),
            SessionState::AwaitingHold => write!(f, "awaiting hold"),
            SessionState::AwaitingPayout => write!(f, "awaiting payout"),
        }
    }
}

/// One player at one machine: bet, deal, hold, redraw, payout, repeat.
///
/// Every operation checks the current state first. A rejected call returns
/// an error and leaves the session untouched.
#[derive(Debug)]
pub struct Session {
    deck: Deck,
    hand: Hand,
    paytable: Paytable,
    bankroll: u64,
    net_gain: i64,
    bet_pool: u64,
    current_rank: HandRank,
    state: SessionState,
}

impl Session {
    pub fn new() -> PokerResult<Session> {
        Session::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> PokerResult<Session> {
        let deck = match config.seed {
            Some(seed) => Deck::with_seed(config.num_decks, seed)?,
            None => Deck::new(config.num_decks)?,
        };
        let paytable = Paytable::named(&config.paytable)?;
        Ok(Session::with_deck(deck, paytable, config.starting_bankroll))
    }

    /// Plays from a caller-built deck, e.g. a short shoe from [`Deck::without`].
    pub fn with_deck(deck: Deck, paytable: Paytable, bankroll: u64) -> Session {
        Session {
            deck,
            hand: Hand::new(),
            paytable,
            bankroll,
            net_gain: 0,
            bet_pool: 0,
            current_rank: HandRank::Nothing,
            state: SessionState::AwaitingBet,
        }
    }

    fn require(&self, state: SessionState, operation: &'static str) -> PokerResult<()> {
        if self.state != state {
            warn!(operation, state = %self.state, "rejected out-of-order call");
            return Err(PokerError::IllegalState {
                operation,
                state: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Takes the bet and deals a fresh hand from a fully restored deck.
    pub fn place_bet(&mut self, amount: u64) -> PokerResult<HandRank> {
        self.require(SessionState::AwaitingBet, "place a bet")?;
        if amount == 0 || amount > self.paytable.max_bet {
            return Err(PokerError::InvalidBet {
                bet: amount,
                max: self.paytable.max_bet,
            });
        }
        if amount > self.bankroll {
            return Err(PokerError::InsufficientFunds {
                bet: amount,
                bankroll: self.bankroll,
            });
        }

        self.deck.restore();
        let dealt = self.deck.deal(HAND_SIZE)?;
        let rank = rank_hand(&dealt)?;
        self.hand.set_cards(&dealt)?;

        self.bankroll -= amount;
        self.net_gain -= amount as i64;
        self.bet_pool = amount;
        self.current_rank = rank;
        self.state = SessionState::AwaitingHold;
        info!(bet = amount, bankroll = self.bankroll, %rank, "dealt");
        Ok(rank)
    }

    /// Replaces every card whose `keep` flag is false with a fresh card.
    pub fn apply_hold(&mut self, keep: &[bool]) -> PokerResult<HandRank> {
        self.require(SessionState::AwaitingHold, "draw")?;
        if keep.len() != HAND_SIZE {
            return Err(PokerError::InvalidHoldMask(keep.len()));
        }

        let discards = keep.iter().filter(|&&k| !k).count();
        let replacements = self.deck.deal(discards)?;
        self.hand.replace_unheld(keep, replacements)?;
        let rank = self.hand.rank()?;

        self.current_rank = rank;
        self.state = SessionState::AwaitingPayout;
        debug!(discards, %rank, "redrew");
        Ok(rank)
    }

    /// Pays the final hand and returns the amount credited.
    pub fn settle_payout(&mut self) -> PokerResult<u64> {
        self.require(SessionState::AwaitingPayout, "settle")?;
        let winnings = self.paytable.payout(self.current_rank, self.bet_pool);

        self.bankroll += winnings;
        self.net_gain += winnings as i64;
        self.bet_pool = 0;
        self.state = SessionState::AwaitingBet;
        info!(winnings, bankroll = self.bankroll, net = self.net_gain, "paid");
        Ok(winnings)
    }

    /// Credits the bankroll. Fails rather than wrapping past `u64::MAX`.
    pub fn add_funds(&mut self, amount: u64) -> PokerResult<u64> {
        self.bankroll = self.bankroll.checked_add(amount).ok_or_else(|| {
            PokerError::InvalidValue(format!("adding {} overflows the bankroll", amount))
        })?;
        Ok(self.bankroll)
    }

    pub fn current_hand_rank(&self) -> HandRank {
        self.current_rank
    }

    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }

    pub fn net_gain(&self) -> i64 {
        self.net_gain
    }

    pub fn current_bet(&self) -> u64 {
        self.bet_pool
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cards_in_hand(&self) -> &[Card] {
        self.hand.cards()
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    /// Cards not yet dealt this round, for asking the solver about the
    /// current hand.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}
