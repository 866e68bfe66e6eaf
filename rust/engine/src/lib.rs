//! # blackjack-engine: Multi-player Blackjack Environment
//!
//! A turn-based Blackjack episode engine for training and evaluating
//! decision-making agents. Any number of gamblers play against one dealer;
//! every episode ends with one reward per gambler and the full
//! observation/action trajectory of each gambler.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the 52-card set
//! - [`deck`] - Infinite (with replacement) and finite k-deck card sources
//! - [`hand`] - Hand points and usable-ace tracking
//! - [`player`] - Seats: role, hand and per-episode status
//! - [`table`] - Seat list with the dealer last, plus the shared deck
//! - [`game`] - Episode state machine, turn loop and settlement
//! - [`policy`] - Observation, Action and the `Policy` trait
//! - [`rules`] - Thresholds, rewards and the dealer rule
//! - [`logger`] - Episode records and JSONL serialization
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::game::{Game, GameStatus};
//! use blackjack_engine::policy::{Action, Observation, Policy};
//!
//! struct StickOnTwenty;
//!
//! impl Policy for StickOnTwenty {
//!     fn predict(&mut self, obs: &Observation) -> Action {
//!         if obs.player_points < 20 { Action::Hit } else { Action::Stick }
//!     }
//!     fn name(&self) -> &str { "stick-on-20" }
//! }
//!
//! // Infinite deck, two gamblers and the dealer
//! let mut game = Game::with_seed(0, 3, 7).unwrap();
//! let episode = game.play(&mut StickOnTwenty).unwrap();
//! assert_ne!(episode.status, GameStatus::Playing);
//! assert_eq!(episode.rewards.len(), 2);
//! ```
//!
//! ## Deterministic Episodes
//!
//! Every deck owns a ChaCha20 generator. Seeded tables replay identically:
//!
//! ```rust
//! use blackjack_engine::deck::Deck;
//!
//! let mut d1 = Deck::new_with_seed(6, 42);
//! let mut d2 = Deck::new_with_seed(6, 42);
//! assert_eq!(d1.deal(5).unwrap(), d2.deal(5).unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod policy;
pub mod rules;
pub mod table;
