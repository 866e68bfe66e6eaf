use crate::deck::{Deck, CARDS_PER_DECK};
use crate::errors::GameError;
use crate::player::{Player, PlayerStatus, Role};

pub const MIN_PLAYERS: usize = 2;

/// Seats plus the shared deck.
///
/// A table holds `players - 1` gamblers followed by exactly one dealer. The
/// seat count and the dealer's position never change; [`Table::reset`] only
/// clears hands, statuses and the deck between episodes.
#[derive(Debug, Clone)]
pub struct Table {
    players: Vec<Player>,
    deck: Deck,
}

impl Table {
    /// `decks == 0` means an infinite deck.
    pub fn new(decks: u32, players: usize) -> Result<Self, GameError> {
        Self::with_seed(decks, players, rand::random())
    }

    pub fn with_seed(decks: u32, players: usize, seed: u64) -> Result<Self, GameError> {
        validate(decks, players)?;
        Self::with_deck(Deck::new_with_seed(decks, seed), players)
    }

    /// Seat `players` around an already-built deck (e.g. a stacked one).
    pub fn with_deck(deck: Deck, players: usize) -> Result<Self, GameError> {
        validate(deck.decks(), players)?;
        let mut seats: Vec<Player> = (0..players - 1)
            .map(|i| Player::new(i, Role::Gambler))
            .collect();
        seats.push(Player::new(players - 1, Role::Dealer));
        Ok(Self {
            players: seats,
            deck,
        })
    }

    pub fn reset(&mut self) {
        self.deck.reset();
        for p in &mut self.players {
            p.reset();
        }
    }

    /// Deal `n` cards to every seat in turn order. Refuses to deal if any
    /// seat already holds cards.
    pub fn deal_all(&mut self, n: usize) -> Result<(), GameError> {
        if let Some(p) = self.players.iter().find(|p| !p.hand().is_empty()) {
            return Err(GameError::AlreadyDealt {
                seat: p.id(),
                cards: p.hand().len(),
            });
        }
        for p in &mut self.players {
            let cards = self.deck.deal(n)?;
            p.draw(&cards);
        }
        Ok(())
    }

    pub fn players_status(&self) -> Vec<PlayerStatus> {
        self.players.iter().map(|p| p.status()).collect()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn gamblers(&self) -> &[Player] {
        &self.players[..self.players.len() - 1]
    }

    pub fn dealer(&self) -> &Player {
        &self.players[self.players.len() - 1]
    }

    pub fn dealer_index(&self) -> usize {
        self.players.len() - 1
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn decks(&self) -> u32 {
        self.deck.decks()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }
}

fn validate(decks: u32, players: usize) -> Result<(), GameError> {
    if players < MIN_PLAYERS {
        return Err(GameError::InvalidConfig(format!(
            "at least {} players required, got {}",
            MIN_PLAYERS, players
        )));
    }
    // the whole shoe is materialized, so its card count must be addressable
    if usize::try_from(decks)
        .ok()
        .and_then(|d| d.checked_mul(CARDS_PER_DECK))
        .is_none()
    {
        return Err(GameError::InvalidConfig(format!(
            "a shoe of {} decks does not fit in memory",
            decks
        )));
    }
    Ok(())
}
