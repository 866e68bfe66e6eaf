//! Shared training loop for the tabular learners.

use std::collections::VecDeque;

use blackjack_engine::game::{Episode, Game};
use blackjack_engine::policy::Policy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PolicyError;
use crate::qtable::QTable;

/// Updates averaged by the convergence check
pub const CONVERGENCE_WINDOW: usize = 100;
/// Mean absolute update at or below which training stops
pub const CONVERGENCE_TOLERANCE: f64 = 1e-3;

/// Hyper-parameters shared by every learner. Each learner reads the fields
/// that apply to its update and exploration schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub episodes: usize,
    /// Step size α
    pub learning_rate: f64,
    /// Discount γ
    pub gamma: f64,
    /// Initial exploration rate ε
    pub epsilon: f64,
    /// Multiplicative ε decay applied after every episode
    pub epsilon_decay: f64,
    pub eps_min: f64,
    /// Episodes between convergence checks
    pub check_every: usize,
    pub stop_at_convergence: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            learning_rate: 0.1,
            gamma: 1.0,
            epsilon: 0.1,
            epsilon_decay: 0.995,
            eps_min: 0.05,
            check_every: 5,
            stop_at_convergence: true,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), PolicyError> {
        let bad = |msg: String| -> Result<(), PolicyError> {
            Err(PolicyError::InvalidParameter(msg))
        };
        if self.episodes == 0 {
            return bad("episodes must be at least 1".into());
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return bad(format!("learning rate {} outside (0, 1]", self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return bad(format!("gamma {} outside [0, 1]", self.gamma));
        }
        for (name, v) in [
            ("epsilon", self.epsilon),
            ("epsilon decay", self.epsilon_decay),
            ("minimum epsilon", self.eps_min),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return bad(format!("{} {} outside [0, 1]", name, v));
            }
        }
        if self.check_every == 0 {
            return bad("check_every must be at least 1".into());
        }
        Ok(())
    }
}

/// Summary of a finished training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub episodes_run: usize,
    pub converged: bool,
    pub final_epsilon: f64,
    /// Mean absolute value of the most recent updates
    pub mean_update: Option<f64>,
    /// State-action pairs never moved away from zero
    pub unseen: usize,
}

/// Sliding window over the most recent value updates.
#[derive(Debug, Clone)]
pub struct UpdateWindow {
    updates: VecDeque<f64>,
    capacity: usize,
}

impl UpdateWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            updates: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, update: f64) {
        if self.updates.len() == self.capacity {
            self.updates.pop_front();
        }
        self.updates.push_back(update);
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.updates.len() == self.capacity
    }

    pub fn mean_abs(&self) -> Option<f64> {
        if self.updates.is_empty() {
            return None;
        }
        Some(self.updates.iter().map(|u| u.abs()).sum::<f64>() / self.updates.len() as f64)
    }

    /// Full window whose mean absolute update is within `tolerance`.
    pub fn converged(&self, tolerance: f64) -> bool {
        self.is_full() && self.mean_abs().is_some_and(|m| m <= tolerance)
    }
}

impl Default for UpdateWindow {
    fn default() -> Self {
        Self::new(CONVERGENCE_WINDOW)
    }
}

/// A policy that improves its own [`QTable`] from the episodes it plays.
pub trait Learner: Policy {
    fn table(&self) -> &QTable;

    fn epsilon(&self) -> f64;

    /// Set the exploration rate for episode number `episode` (1-based).
    fn begin_episode(&mut self, episode: usize, config: &TrainConfig);

    /// Fold a finished episode into the table, recording every applied
    /// update in `window`.
    fn learn(&mut self, episode: &Episode, config: &TrainConfig, window: &mut UpdateWindow);
}

/// Train `learner` by playing up to `config.episodes` episodes on `game`.
///
/// Progress is logged ten times per run. Every `check_every` episodes the
/// run stops early once the last [`CONVERGENCE_WINDOW`] updates average at
/// most [`CONVERGENCE_TOLERANCE`] in absolute value.
pub fn train<L: Learner>(
    learner: &mut L,
    game: &mut Game,
    config: &TrainConfig,
) -> Result<TrainReport, PolicyError> {
    config.validate()?;
    let report_every = (config.episodes / 10).max(1);
    let mut window = UpdateWindow::default();
    let mut converged = false;
    let mut episodes_run = 0;

    for episode in 1..=config.episodes {
        learner.begin_episode(episode, config);
        let played = game.play(learner)?;
        learner.learn(&played, config, &mut window);
        episodes_run = episode;

        if episode % report_every == 0 {
            info!(
                learner = learner.name(),
                episode,
                episodes = config.episodes,
                epsilon = learner.epsilon(),
                unseen = learner.table().unseen(),
                mean_update = ?window.mean_abs(),
                "training progress"
            );
        }

        if config.stop_at_convergence
            && episode % config.check_every == 0
            && window.converged(CONVERGENCE_TOLERANCE)
        {
            info!(
                learner = learner.name(),
                episode,
                "converged: mean of the last {} updates is within {}",
                CONVERGENCE_WINDOW,
                CONVERGENCE_TOLERANCE
            );
            converged = true;
            break;
        }
    }

    Ok(TrainReport {
        episodes_run,
        converged,
        final_epsilon: learner.epsilon(),
        mean_update: window.mean_abs(),
        unseen: learner.table().unseen(),
    })
}
