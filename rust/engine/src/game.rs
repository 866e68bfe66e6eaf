use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::cards::Card;
use crate::errors::GameError;
use crate::player::PlayerStatus;
use crate::policy::{Action, Observation, Policy};
use crate::rules::{self, FORCED_HIT_BELOW};
use crate::table::Table;

/// Status of an episode as a whole. Everything but `Playing` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Every seat has stuck or gone bust
    End,
    Playing,
    /// A gambler, or only the dealer, was dealt a natural
    Natural,
    /// A gambler and the dealer were both dealt a natural
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}

/// Observation/action pairs recorded for one gambler, in decision order.
pub type Trajectory = Vec<(Observation, Action)>;

/// Result of one complete episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Terminal status, never `Playing`
    pub status: GameStatus,
    /// One reward per gambler, dealer excluded
    pub rewards: Vec<f64>,
    /// One trajectory per gambler, dealer excluded
    pub trajectories: Vec<Trajectory>,
}

/// Episode engine wrapping one [`Table`].
///
/// # Turn order
///
/// Gamblers act first, in seat order, and the dealer acts last. The active
/// seat keeps acting until it sticks or busts. Before a gambler is asked for
/// a decision it is hit automatically while its total is below
/// [`FORCED_HIT_BELOW`]; those draws never reach the policy and never appear
/// in its trajectory. The dealer follows [`rules::dealer_action`].
///
/// # Examples
///
/// ```
/// use blackjack_engine::game::Game;
/// use blackjack_engine::rules::DealerPolicy;
///
/// let mut game = Game::with_seed(0, 3, 42).expect("valid table");
/// let episode = game.play(&mut DealerPolicy).expect("episode completes");
/// assert!(episode.status.is_terminal());
/// assert_eq!(episode.rewards.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    table: Table,
    /// Index of the seat whose turn it is
    active: usize,
    /// Dealer's face-up card, set once the initial hands are dealt
    dealer_face_up: Option<Card>,
}

impl Game {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            active: 0,
            dealer_face_up: None,
        }
    }

    pub fn with_seed(decks: u32, players: usize, seed: u64) -> Result<Self, GameError> {
        Ok(Self::new(Table::with_seed(decks, players, seed)?))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn dealer_face_up(&self) -> Option<Card> {
        self.dealer_face_up
    }

    /// Start a new episode: reset the table, deal two cards to every seat and
    /// hand the turn to the first gambler.
    pub fn reset(&mut self) -> Result<GameStatus, GameError> {
        self.table.reset();
        self.dealer_face_up = None;
        self.table.deal_all(2)?;
        self.dealer_face_up = self.table.dealer().hand().first();
        self.active = 0;
        debug!(
            hands = ?self
                .table
                .players()
                .iter()
                .map(|p| p.hand().plain_cards())
                .collect::<Vec<_>>(),
            face_up = ?self.dealer_face_up,
            "every player has drawn two cards"
        );
        Ok(self.status())
    }

    /// Classify the episode from the seats' statuses.
    pub fn status(&self) -> GameStatus {
        let dealer_natural = self.table.dealer().status() == PlayerStatus::Natural;
        let gambler_natural = self
            .table
            .gamblers()
            .iter()
            .any(|p| p.status() == PlayerStatus::Natural);

        if gambler_natural {
            if dealer_natural {
                GameStatus::Draw
            } else {
                GameStatus::Natural
            }
        } else if dealer_natural {
            GameStatus::Natural
        } else if self
            .table
            .players()
            .iter()
            .all(|p| p.status() != PlayerStatus::Playing)
        {
            GameStatus::End
        } else {
            GameStatus::Playing
        }
    }

    /// What the active seat sees: own total, dealer's face-up value and
    /// usable-ace flag.
    pub fn observe(&self) -> Result<Observation, GameError> {
        let face_up = self.dealer_face_up.ok_or(GameError::NotDealt)?;
        let seat = &self.table.players()[self.active];
        Ok(Observation::new(
            seat.points(),
            face_up.points(),
            seat.usable_ace(),
        ))
    }

    /// Apply `action` for the active seat.
    ///
    /// Returns the observation of the seat to act next (the turn passes on
    /// after a stick or a bust) together with the recomputed episode status.
    pub fn step(&mut self, action: Action) -> Result<(Observation, GameStatus), GameError> {
        if self.dealer_face_up.is_none() {
            return Err(GameError::NotDealt);
        }
        if self.status().is_terminal() {
            return Err(GameError::EpisodeOver);
        }
        self.execute(action)?;
        let status = self.status();

        let seat = &self.table.players()[self.active];
        debug!(
            seat = self.active,
            action = ?action,
            status = ?seat.status(),
            hand = ?seat.hand().plain_cards(),
            "step"
        );
        if status == GameStatus::Playing
            && (action == Action::Stick || seat.status() == PlayerStatus::LoseBust)
        {
            self.active += 1;
        }
        Ok((self.observe()?, status))
    }

    fn execute(&mut self, action: Action) -> Result<(), GameError> {
        match action {
            Action::Stick => self.table.players_mut()[self.active].stick(),
            Action::Hit => {
                let cards = self.table.deck_mut().deal(1)?;
                self.table.players_mut()[self.active].draw(&cards);
                Ok(())
            }
        }
    }

    // Hit the active gambler until its total reaches FORCED_HIT_BELOW.
    fn force_hits(&mut self) -> Result<(), GameError> {
        loop {
            let seat = &self.table.players()[self.active];
            if seat.is_dealer()
                || seat.status() != PlayerStatus::Playing
                || seat.points() >= FORCED_HIT_BELOW
            {
                return Ok(());
            }
            let cards = self.table.deck_mut().deal(1)?;
            self.table.players_mut()[self.active].draw(&cards);
        }
    }

    /// Play one full episode with `policy` deciding for every gambler.
    ///
    /// When the deal itself ends the episode (a natural or a draw) no real
    /// decision is made; each gambler's policy is still asked once so that
    /// every trajectory carries the dealt observation.
    pub fn play<P: Policy + ?Sized>(&mut self, policy: &mut P) -> Result<Episode, GameError> {
        info!(
            decks = self.table.decks(),
            players = self.table.len(),
            policy = policy.name(),
            "episode starts"
        );
        let gamblers = self.table.len() - 1;
        let mut trajectories: Vec<Trajectory> = vec![Vec::new(); gamblers];

        let mut status = self.reset()?;
        let decided_by_deal = status.is_terminal();

        while !status.is_terminal() {
            self.force_hits()?;
            let observation = self.observe()?;
            let action = if self.active == self.table.dealer_index() {
                rules::dealer_action(observation.player_points)
            } else {
                let action = policy.predict(&observation);
                trajectories[self.active].push((observation, action));
                action
            };
            status = self.step(action)?.1;
        }

        let rewards = self.settle(status);

        if decided_by_deal {
            for (seat, trajectory) in trajectories.iter_mut().enumerate() {
                self.active = seat;
                let observation = self.observe()?;
                let action = policy.predict(&observation);
                trajectory.push((observation, action));
            }
        }

        info!(
            status = ?status,
            points = ?self.table.players().iter().map(|p| p.points()).collect::<Vec<_>>(),
            result = ?self.table.players_status(),
            rewards = ?rewards,
            "episode finished"
        );
        Ok(Episode {
            status,
            rewards,
            trajectories,
        })
    }

    /// Compute one reward per gambler for a terminal `status` and assign
    /// final seat statuses.
    fn settle(&mut self, status: GameStatus) -> Vec<f64> {
        let dealer = self.table.dealer_index();
        // busted hands cannot win on points
        let points: Vec<u8> = self
            .table
            .players()
            .iter()
            .map(|p| {
                if p.status() == PlayerStatus::LoseBust {
                    0
                } else {
                    p.points()
                }
            })
            .collect();
        let dealer_bust = self.table.dealer().status() == PlayerStatus::LoseBust;
        let any_survivor = self
            .table
            .gamblers()
            .iter()
            .any(|p| p.status() != PlayerStatus::LoseBust);

        for p in self.table.players_mut() {
            if !matches!(p.status(), PlayerStatus::Natural | PlayerStatus::LoseBust) {
                p.set_status(PlayerStatus::Lose);
            }
        }

        let mut rewards = vec![rules::REWARD_DRAW; dealer];
        match status {
            GameStatus::Draw => {
                info!("gambler and dealer both dealt a natural");
            }
            GameStatus::Natural => {
                for (j, reward) in rewards.iter_mut().enumerate() {
                    *reward = if self.table.players()[j].status() == PlayerStatus::Natural {
                        rules::REWARD_NATURAL
                    } else {
                        rules::REWARD_LOSE
                    };
                }
            }
            GameStatus::End if dealer_bust => {
                if any_survivor {
                    for (j, reward) in rewards.iter_mut().enumerate() {
                        if points[j] != 0 {
                            self.table.players_mut()[j].set_status(PlayerStatus::Win);
                            *reward = rules::REWARD_WIN;
                        } else {
                            *reward = rules::REWARD_LOSE;
                        }
                    }
                } else {
                    info!("everyone went bust");
                }
            }
            GameStatus::End => {
                let dealer_points = points[dealer];
                let best = points[..dealer].iter().copied().max().unwrap_or(0);
                match best.cmp(&dealer_points) {
                    Ordering::Less => {
                        self.table.players_mut()[dealer].set_status(PlayerStatus::Win);
                        rewards.fill(rules::REWARD_LOSE);
                    }
                    Ordering::Equal => {}
                    Ordering::Greater => {
                        for (j, reward) in rewards.iter_mut().enumerate() {
                            if points[j] >= dealer_points {
                                self.table.players_mut()[j].set_status(PlayerStatus::Win);
                                *reward = rules::REWARD_WIN;
                            } else {
                                *reward = rules::REWARD_LOSE;
                            }
                        }
                    }
                }
            }
            GameStatus::Playing => unreachable!("settlement requires a terminal status"),
        }
        rewards
    }
}
