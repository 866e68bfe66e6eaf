use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

pub const CARDS_PER_DECK: usize = 52;

/// Card source shared by every seat at a table.
///
/// With `decks == 0` the deck is infinite: every card is sampled uniformly
/// from the 52-card set and nothing is ever removed. With `decks == k` the
/// deck holds `k` copies of the 52-card set and each dealt card is removed,
/// so the shoe strictly shrinks until it is exhausted.
///
/// Cards are drawn by random index, so no shuffle step exists.
#[derive(Debug, Clone)]
pub struct Deck {
    decks: u32,
    cards: Vec<Card>,
    // dealt before any sampled card, last element first
    stacked: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new(decks: u32) -> Self {
        Self::new_with_seed(decks, rand::random())
    }

    pub fn new_with_seed(decks: u32, seed: u64) -> Self {
        let mut deck = Self {
            decks,
            cards: Vec::new(),
            stacked: Vec::new(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.reset();
        deck
    }

    /// Build a deck whose next cards are `order`, in that order.
    ///
    /// Used to script deterministic episodes. See [`Deck::stack`].
    pub fn stacked(decks: u32, seed: u64, order: &[Card]) -> Self {
        let mut deck = Self::new_with_seed(decks, seed);
        deck.stack(order);
        deck
    }

    /// Place `order` on top of the shoe. Stacked cards survive [`Deck::reset`]
    /// and are dealt before any sampled card. In a finite deck each stacked
    /// card also removes one matching instance from the remaining multiset;
    /// a stacked card with no instance left is never dealt and the shoe
    /// counts as exhausted.
    pub fn stack(&mut self, order: &[Card]) {
        self.stacked = order.iter().rev().copied().collect();
    }

    /// Restore the full composition for a new episode.
    pub fn reset(&mut self) {
        self.cards = if self.decks == 0 {
            full_deck()
        } else {
            let one = full_deck();
            let mut all = Vec::with_capacity(CARDS_PER_DECK * self.decks as usize);
            for _ in 0..self.decks {
                all.extend_from_slice(&one);
            }
            all
        };
    }

    pub fn decks(&self) -> u32 {
        self.decks
    }

    pub fn is_infinite(&self) -> bool {
        self.decks == 0
    }

    /// Cards left in a finite shoe, `None` for an infinite deck.
    pub fn remaining(&self) -> Option<usize> {
        if self.is_infinite() {
            None
        } else {
            Some(self.cards.len())
        }
    }

    /// Current composition the next card is sampled from.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if let Some(&card) = self.stacked.last() {
            if !self.is_infinite() {
                let pos = self.cards.iter().position(|c| *c == card)?;
                self.cards.swap_remove(pos);
            }
            self.stacked.pop();
            return Some(card);
        }
        if self.cards.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.cards.len());
        if self.is_infinite() {
            Some(self.cards[idx])
        } else {
            Some(self.cards.swap_remove(idx))
        }
    }

    /// Deal `n` cards. A finite shoe holding fewer than `n` cards deals
    /// nothing and reports [`GameError::DeckExhausted`].
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if let Some(remaining) = self.remaining() {
            if remaining < n {
                return Err(GameError::DeckExhausted {
                    requested: n,
                    remaining,
                });
            }
        }
        (0..n)
            .map(|_| {
                self.deal_card().ok_or(GameError::DeckExhausted {
                    requested: n,
                    remaining: 0,
                })
            })
            .collect()
    }
}
