use crate::cards::Card;
use crate::error::{PokerError, PokerResult};
use crate::hand_evaluator::{rank_hand, HandRank, HAND_SIZE};

/// The player's cards: anywhere from empty up to a complete five-card hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(HAND_SIZE),
        }
    }

    pub fn from_cards(cards: &[Card]) -> PokerResult<Hand> {
        let mut hand = Hand::new();
        hand.set_cards(cards)?;
        Ok(hand)
    }

    /// Replaces the whole hand.
    pub fn set_cards(&mut self, cards: &[Card]) -> PokerResult<()> {
        if cards.len() > HAND_SIZE {
            return Err(PokerError::HandOverflow);
        }
        self.cards.clear();
        self.cards.extend_from_slice(cards);
        Ok(())
    }

    pub fn card(&self, index: usize) -> PokerResult<Card> {
        self.cards
            .get(index)
            .copied()
            .ok_or(PokerError::InvalidPosition(index))
    }

    /// Swaps in `card` at `index`, returning the card it replaced.
    pub fn set_card(&mut self, index: usize, card: Card) -> PokerResult<Card> {
        let slot = self
            .cards
            .get_mut(index)
            .ok_or(PokerError::InvalidPosition(index))?;
        Ok(std::mem::replace(slot, card))
    }

    pub fn add_card(&mut self, card: Card) -> PokerResult<()> {
        if self.cards.len() >= HAND_SIZE {
            return Err(PokerError::HandOverflow);
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn add_cards(&mut self, cards: &[Card]) -> PokerResult<()> {
        if self.cards.len() + cards.len() > HAND_SIZE {
            return Err(PokerError::HandOverflow);
        }
        self.cards.extend_from_slice(cards);
        Ok(())
    }

    pub fn remove_card(&mut self, index: usize) -> PokerResult<Card> {
        if index >= self.cards.len() {
            return Err(PokerError::InvalidPosition(index));
        }
        Ok(self.cards.remove(index))
    }

    /// Removes one occurrence of each given card. Returns how many were found.
    pub fn remove_cards(&mut self, cards: &[Card]) -> usize {
        let mut removed = 0;
        for card in cards {
            if let Some(pos) = self.cards.iter().rposition(|c| c == card) {
                self.cards.remove(pos);
                removed += 1;
            }
        }
        removed
    }

    /// Replaces every position whose `hold` flag is false, consuming
    /// `replacements` from the back.
    pub fn replace_unheld(&mut self, hold: &[bool], mut replacements: Vec<Card>) -> PokerResult<()> {
        if hold.len() != HAND_SIZE {
            return Err(PokerError::InvalidHoldMask(hold.len()));
        }
        if self.cards.len() != HAND_SIZE {
            return Err(PokerError::InvalidHandSize(self.cards.len()));
        }
        let needed = hold.iter().filter(|&&h| !h).count();
        if replacements.len() < needed {
            return Err(PokerError::NotEnoughDeck {
                requested: needed,
                available: replacements.len(),
            });
        }
        for (slot, &held) in self.cards.iter_mut().zip(hold) {
            if !held {
                if let Some(card) = replacements.pop() {
                    *slot = card;
                }
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == HAND_SIZE
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn rank(&self) -> PokerResult<HandRank> {
        rank_hand(&self.cards)
    }
}
