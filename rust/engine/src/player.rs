use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::Hand;
use serde::{Deserialize, Serialize};

/// Which side of the table a seat plays for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Decides through an external policy
    Gambler,
    /// Decides through the fixed dealer rule, always seated last
    Dealer,
}

/// Per-episode status of a seat.
///
/// During play a seat only moves from `Playing` to `Stick` or `LoseBust`
/// (or is dealt a `Natural`). `Win` and `Lose` are assigned by settlement.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    Win,
    Lose,
    LoseBust,
    Playing,
    Stick,
    Natural,
}

/// A seat at the table: role, hand and status.
#[derive(Debug, Clone)]
pub struct Player {
    /// Seat index in turn order
    id: usize,
    role: Role,
    hand: Hand,
    status: PlayerStatus,
}

impl Player {
    pub fn new(id: usize, role: Role) -> Self {
        Self {
            id,
            role,
            hand: Hand::new(),
            status: PlayerStatus::Playing,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn is_dealer(&self) -> bool {
        self.role == Role::Dealer
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn points(&self) -> u8 {
        self.hand.points()
    }
    pub fn usable_ace(&self) -> bool {
        self.hand.usable_ace()
    }

    /// Add cards to the hand and re-derive bust / natural status.
    pub fn draw(&mut self, cards: &[Card]) {
        self.hand.draw(cards);
        if self.hand.is_bust() {
            self.status = PlayerStatus::LoseBust;
        }
        if self.hand.is_natural() {
            self.status = PlayerStatus::Natural;
        }
    }

    pub fn stick(&mut self) -> Result<(), GameError> {
        if self.status == PlayerStatus::LoseBust {
            return Err(GameError::StickAfterBust { seat: self.id });
        }
        self.status = PlayerStatus::Stick;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    pub fn reset(&mut self) {
        self.hand.clear();
        self.status = PlayerStatus::Playing;
    }
}
