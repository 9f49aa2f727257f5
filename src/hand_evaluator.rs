use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::{PokerError, PokerResult};

pub const HAND_SIZE: usize = 5;
pub const NUM_RANKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    Nothing = 0,
    JacksOrBetter = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

pub const ALL_HAND_RANKS: [HandRank; NUM_RANKS] = [
    HandRank::Nothing,
    HandRank::JacksOrBetter,
    HandRank::TwoPair,
    HandRank::ThreeOfAKind,
    HandRank::Straight,
    HandRank::Flush,
    HandRank::FullHouse,
    HandRank::FourOfAKind,
    HandRank::StraightFlush,
    HandRank::RoyalFlush,
];

impl HandRank {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<HandRank> {
        ALL_HAND_RANKS.get(index).copied()
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandRank::Nothing => write!(f, "Nothing"),
            HandRank::JacksOrBetter => write!(f, "Jacks or Better"),
            HandRank::TwoPair => write!(f, "Two Pair"),
            HandRank::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandRank::Straight => write!(f, "Straight"),
            HandRank::Flush => write!(f, "Flush"),
            HandRank::FullHouse => write!(f, "Full House"),
            HandRank::FourOfAKind => write!(f, "Four of a Kind"),
            HandRank::StraightFlush => write!(f, "Straight Flush"),
            HandRank::RoyalFlush => write!(f, "Royal Flush"),
        }
    }
}

fn is_flush(cards: &[Card; HAND_SIZE]) -> bool {
    cards.windows(2).all(|w| w[0].suit == w[1].suit)
}

/// `values` sorted ascending. The wheel (A-2-3-4-5) counts as a straight.
fn is_straight(values: &[u8; HAND_SIZE]) -> bool {
    if *values == [2, 3, 4, 5, 14] {
        return true;
    }
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Classifies exactly five cards.
///
/// Rank multiplicities are counted in one pass and the count pattern decides
/// the paired categories, so trips plus an unrelated pair is always a full
/// house and four (or, from a multi-pack shoe, five) of a rank is always
/// quads. Straights need five distinct ranks, so a paired hand never
/// registers as one.
pub fn rank_five(cards: &[Card; HAND_SIZE]) -> HandRank {
    let mut values = cards.map(|c| c.value());
    values.sort_unstable();

    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }

    let mut max_count = 0u8;
    let mut pairs = 0u8;
    let mut pair_value = 0u8;
    for (value, &count) in counts.iter().enumerate() {
        max_count = max_count.max(count);
        if count == 2 {
            pairs += 1;
            pair_value = value as u8;
        }
    }

    let flush = is_flush(cards);
    let straight = max_count == 1 && is_straight(&values);
    // The wheel tops out at 5, so only a ten-to-ace run is royal.
    let ace_high = values == [10, 11, 12, 13, 14];

    if straight && flush && ace_high {
        HandRank::RoyalFlush
    } else if straight && flush {
        HandRank::StraightFlush
    } else if max_count >= 4 {
        HandRank::FourOfAKind
    } else if max_count == 3 && pairs == 1 {
        HandRank::FullHouse
    } else if flush {
        HandRank::Flush
    } else if straight {
        HandRank::Straight
    } else if max_count == 3 {
        HandRank::ThreeOfAKind
    } else if pairs == 2 {
        HandRank::TwoPair
    } else if pairs == 1 && pair_value >= 11 {
        HandRank::JacksOrBetter
    } else {
        HandRank::Nothing
    }
}

pub fn rank_hand(cards: &[Card]) -> PokerResult<HandRank> {
    let five: &[Card; HAND_SIZE] = cards
        .try_into()
        .map_err(|_| PokerError::InvalidHandSize(cards.len()))?;
    Ok(rank_five(five))
}
