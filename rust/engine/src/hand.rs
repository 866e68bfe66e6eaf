use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::{ACE_BONUS, BLACKJACK};

/// A card as held in one particular hand.
///
/// The usable-ace marker belongs to the hand, not to the card: the same
/// [`Card`] value can sit in two hands with different markers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandCard {
    pub card: Card,
    /// Set on the single ace currently counted as 11
    pub usable_ace: bool,
}

/// A seat's drawn cards with derived points and usable-ace flag.
///
/// Both derived values are recomputed after every draw:
/// - `usable_ace` is true when the hand holds an ace and its base points
///   plus 10 stay within 21; only the first ace carries the marker.
/// - `points` is the sum of capped card values, plus 10 when an ace is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<HandCard>,
    points: u8,
    usable_ace: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut hand = Self::new();
        hand.draw(cards);
        hand
    }

    pub fn draw(&mut self, cards: &[Card]) {
        self.cards.extend(cards.iter().map(|&card| HandCard {
            card,
            usable_ace: false,
        }));
        self.recompute();
    }

    fn recompute(&mut self) {
        let base = self.base_points();
        let first_ace = self.cards.iter().position(|hc| hc.card.is_ace());
        self.usable_ace = first_ace.is_some() && base + ACE_BONUS <= BLACKJACK;
        for (i, hc) in self.cards.iter_mut().enumerate() {
            hc.usable_ace = self.usable_ace && Some(i) == first_ace;
        }
        self.points = if self.usable_ace {
            base + ACE_BONUS
        } else {
            base
        };
    }

    /// Sum of capped card values with every ace counted as 1.
    pub fn base_points(&self) -> u8 {
        self.cards.iter().map(|hc| hc.card.points()).sum()
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    pub fn usable_ace(&self) -> bool {
        self.usable_ace
    }

    pub fn cards(&self) -> &[HandCard] {
        &self.cards
    }

    /// The underlying cards, markers stripped.
    pub fn plain_cards(&self) -> Vec<Card> {
        self.cards.iter().map(|hc| hc.card).collect()
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().map(|hc| hc.card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_bust(&self) -> bool {
        self.points > BLACKJACK
    }

    /// Two cards totalling 21 through a usable ace.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.usable_ace && self.points == BLACKJACK
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.points = 0;
        self.usable_ace = false;
    }
}
