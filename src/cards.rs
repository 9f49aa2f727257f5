use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{PokerError, PokerResult};

pub const CARDS_PER_PACK: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> PokerResult<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(PokerError::InvalidRank(c)),
        }
    }

    /// Inverse of [`Rank::value`], for ranks 2 through 14.
    pub fn from_value(value: u8) -> Option<Rank> {
        ALL_RANKS.get(value.checked_sub(2)? as usize).copied()
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn from_char(c: char) -> PokerResult<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(PokerError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "\u{2663}",
            Suit::Diamonds => "\u{2666}",
            Suit::Hearts => "\u{2665}",
            Suit::Spades => "\u{2660}",
        }
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// One 52-card pack, suit-major.
pub fn full_pack() -> Vec<Card> {
    ALL_SUITS
        .iter()
        .flat_map(|&s| ALL_RANKS.iter().map(move |&r| Card::new(r, s)))
        .collect()
}

pub fn parse_card(notation: &str) -> PokerResult<Card> {
    let notation = notation.trim();
    let normalized = notation.replace("10", "T");
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() != 2 {
        return Err(PokerError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parses a run of cards such as `"Ts Js Qs Ks As"` or `"TsJsQsKsAs"`.
pub fn parse_hand(notation: &str) -> PokerResult<Vec<Card>> {
    let compact = notation
        .trim()
        .replace([' ', ','], "")
        .replace("10", "T");
    if compact.is_empty() || compact.len() % 2 != 0 {
        return Err(PokerError::InvalidHandNotation(notation.to_string()));
    }
    let chars: Vec<char> = compact.chars().collect();
    chars
        .chunks(2)
        .map(|pair| {
            let s: String = pair.iter().collect();
            parse_card(&s)
        })
        .collect()
}

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A shoe of one or more 52-card packs.
///
/// Live cards and the dealt pile always partition the initial multiset:
/// [`Deck::deal`] moves cards from the former to the latter and
/// [`Deck::restore`] moves them all back. Every draw is uniformly random
/// over the live cards.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: Vec<Card>,
    nominal_size: usize,
    rng: StdRng,
}

impl Deck {
    pub fn new(num_decks: usize) -> PokerResult<Deck> {
        Deck::build(num_decks, StdRng::from_entropy())
    }

    pub fn with_seed(num_decks: usize, seed: u64) -> PokerResult<Deck> {
        Deck::build(num_decks, StdRng::seed_from_u64(seed))
    }

    /// Builds a deck with one copy of each card in `exclude` taken out.
    pub fn without(num_decks: usize, exclude: &[Card], seed: Option<u64>) -> PokerResult<Deck> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let mut deck = Deck::build(num_decks, rng)?;
        for card in exclude {
            let pos = deck
                .cards
                .iter()
                .position(|c| c == card)
                .ok_or_else(|| PokerError::CardNotInDeck(card.to_string()))?;
            deck.cards.swap_remove(pos);
        }
        deck.nominal_size = deck.cards.len();
        Ok(deck)
    }

    fn build(num_decks: usize, mut rng: StdRng) -> PokerResult<Deck> {
        if num_decks == 0 {
            return Err(PokerError::InvalidDeckCount(num_decks));
        }
        let mut cards: Vec<Card> = (0..num_decks).flat_map(|_| full_pack()).collect();
        cards.shuffle(&mut rng);
        let nominal_size = cards.len();
        Ok(Deck {
            cards,
            dealt: Vec::with_capacity(nominal_size),
            nominal_size,
            rng,
        })
    }

    /// Copies `n` random live cards without removing them.
    pub fn sample(&mut self, n: usize) -> PokerResult<Vec<Card>> {
        let Deck { cards, rng, .. } = self;
        sample_from(cards, rng, n)
    }

    /// Like [`Deck::sample`] but driven by a caller-owned RNG, so many workers
    /// can sample one shared deck.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> PokerResult<Vec<Card>> {
        sample_from(&self.cards, rng, n)
    }

    pub fn deal(&mut self, n: usize) -> PokerResult<Vec<Card>> {
        let available = self.cards.len();
        if n > available {
            return Err(PokerError::NotEnoughDeck {
                requested: n,
                available,
            });
        }
        self.cards.shuffle(&mut self.rng);
        let hand = self.cards.split_off(available - n);
        self.dealt.extend_from_slice(&hand);
        Ok(hand)
    }

    pub fn deal_one(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..self.cards.len());
        let card = self.cards.swap_remove(idx);
        self.dealt.push(card);
        Some(card)
    }

    /// Returns every dealt card to the live deck. Returns how many came back.
    pub fn restore(&mut self) -> usize {
        let restored = self.dealt.len();
        self.cards.append(&mut self.dealt);
        restored
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn nominal_size(&self) -> usize {
        self.nominal_size
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn dealt(&self) -> &[Card] {
        &self.dealt
    }
}

fn sample_from<R: Rng + ?Sized>(cards: &[Card], rng: &mut R, n: usize) -> PokerResult<Vec<Card>> {
    if n > cards.len() {
        return Err(PokerError::NotEnoughDeck {
            requested: n,
            available: cards.len(),
        });
    }
    Ok(cards.choose_multiple(rng, n).copied().collect())
}
