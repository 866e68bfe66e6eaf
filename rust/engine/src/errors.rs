use thiserror::Error;

/// Errors raised by the blackjack engine.
///
/// `InvalidConfig` is the only error a well-behaved caller can trigger. Every
/// other variant reports a broken engine contract (dealing twice, sticking a
/// busted seat, stepping a finished episode) and callers are expected to treat
/// it as fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Player {seat} already holds {cards} cards")]
    AlreadyDealt { seat: usize, cards: usize },
    #[error("Player {seat} has gone bust and cannot stick")]
    StickAfterBust { seat: usize },
    #[error("Deck exhausted: requested {requested} cards, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Episode is over")]
    EpisodeOver,
    #[error("No episode in progress")]
    NotDealt,
}
