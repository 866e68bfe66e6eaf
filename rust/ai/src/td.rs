//! One-step temporal-difference learners.
//!
//! Both learners replay each gambler's recorded trajectory after the episode
//! ends. Intermediate steps carry no reward; the gambler's settlement reward
//! arrives on the final step, whose successor value is zero.

use blackjack_engine::game::Episode;
use blackjack_engine::policy::{Action, Observation, Policy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::learner::{Learner, TrainConfig, UpdateWindow};
use crate::qtable::QTable;

/// How the successor's value enters the TD target.
fn td_pass<F>(
    table: &mut QTable,
    episode: &Episode,
    config: &TrainConfig,
    window: &mut UpdateWindow,
    successor: F,
) where
    F: Fn(&QTable, &(Observation, Action)) -> f64,
{
    for (reward, trajectory) in episode.rewards.iter().zip(&episode.trajectories) {
        for (t, (obs, action)) in trajectory.iter().enumerate() {
            let (r, next) = match trajectory.get(t + 1) {
                Some(pair) => (0.0, successor(table, pair)),
                None => (*reward, 0.0),
            };
            if let Some(q) = table.get_mut(obs) {
                let update =
                    config.learning_rate * (r + config.gamma * next - q[action.index()]);
                q[action.index()] += update;
                window.push(update);
            }
        }
    }
}

/// On-policy TD(0) control.
///
/// Target: `r + γ Q(s', a')` with `a'` the action actually taken next. The
/// exploration rate for episode `k` is `min(1/k, eps_min)`.
#[derive(Debug, Clone)]
pub struct Sarsa {
    table: QTable,
    epsilon: f64,
    rng: ChaCha20Rng,
}

impl Sarsa {
    pub fn new(seed: u64) -> Self {
        Self {
            table: QTable::new(),
            epsilon: TrainConfig::default().eps_min,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn into_table(self) -> QTable {
        self.table
    }
}

impl Policy for Sarsa {
    fn predict(&mut self, observation: &Observation) -> Action {
        self.table
            .epsilon_greedy(observation, self.epsilon, &mut self.rng)
    }

    fn q(&self, observation: &Observation) -> Option<[f64; 2]> {
        self.table.get(observation)
    }

    fn name(&self) -> &str {
        "sarsa"
    }
}

impl Learner for Sarsa {
    fn table(&self) -> &QTable {
        &self.table
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn begin_episode(&mut self, episode: usize, config: &TrainConfig) {
        self.epsilon = (1.0 / episode.max(1) as f64).min(config.eps_min);
    }

    fn learn(&mut self, episode: &Episode, config: &TrainConfig, window: &mut UpdateWindow) {
        td_pass(&mut self.table, episode, config, window, |table, (obs, action)| {
            table.value(obs, *action).unwrap_or(0.0)
        });
    }
}

/// Off-policy TD(0) control.
///
/// Target: `r + γ max_a Q(s', a)`. Exploration decays geometrically from
/// `config.epsilon` and never drops below `config.eps_min`.
#[derive(Debug, Clone)]
pub struct QLearning {
    table: QTable,
    epsilon: f64,
    rng: ChaCha20Rng,
}

impl QLearning {
    pub fn new(seed: u64) -> Self {
        Self {
            table: QTable::new(),
            epsilon: TrainConfig::default().epsilon,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn into_table(self) -> QTable {
        self.table
    }
}

impl Policy for QLearning {
    fn predict(&mut self, observation: &Observation) -> Action {
        self.table
            .epsilon_greedy(observation, self.epsilon, &mut self.rng)
    }

    fn q(&self, observation: &Observation) -> Option<[f64; 2]> {
        self.table.get(observation)
    }

    fn name(&self) -> &str {
        "qlearning"
    }
}

impl Learner for QLearning {
    fn table(&self) -> &QTable {
        &self.table
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn begin_episode(&mut self, episode: usize, config: &TrainConfig) {
        self.epsilon = if episode <= 1 {
            config.epsilon
        } else {
            (self.epsilon * config.epsilon_decay).max(config.eps_min)
        };
    }

    fn learn(&mut self, episode: &Episode, config: &TrainConfig, window: &mut UpdateWindow) {
        td_pass(&mut self.table, episode, config, window, |table, (obs, _)| {
            table.max_value(obs).unwrap_or(0.0)
        });
    }
}
