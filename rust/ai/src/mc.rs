//! Monte Carlo methods: ε-greedy control and first-principles prediction of
//! a fixed policy's state values.

use std::collections::BTreeMap;

use blackjack_engine::game::{Episode, Game};
use blackjack_engine::policy::{Action, Observation, Policy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::error::PolicyError;
use crate::learner::{Learner, TrainConfig, UpdateWindow};
use crate::qtable::QTable;

/// Every-visit, constant-α Monte Carlo control.
///
/// Each visited state-action pair moves toward the discounted return that
/// followed it: `Q(s,a) += α (G - Q(s,a))`. Exploration starts at
/// `config.epsilon` and is multiplied by `config.epsilon_decay` after every
/// episode.
#[derive(Debug, Clone)]
pub struct MonteCarloControl {
    table: QTable,
    epsilon: f64,
    rng: ChaCha20Rng,
}

impl MonteCarloControl {
    pub fn new(seed: u64) -> Self {
        Self::with_table(QTable::new(), seed)
    }

    pub fn with_table(table: QTable, seed: u64) -> Self {
        Self {
            table,
            epsilon: TrainConfig::default().epsilon,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn into_table(self) -> QTable {
        self.table
    }
}

impl Policy for MonteCarloControl {
    fn predict(&mut self, observation: &Observation) -> Action {
        self.table
            .epsilon_greedy(observation, self.epsilon, &mut self.rng)
    }

    fn q(&self, observation: &Observation) -> Option<[f64; 2]> {
        self.table.get(observation)
    }

    fn name(&self) -> &str {
        "mc"
    }
}

impl Learner for MonteCarloControl {
    fn table(&self) -> &QTable {
        &self.table
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn begin_episode(&mut self, episode: usize, config: &TrainConfig) {
        if episode <= 1 {
            self.epsilon = config.epsilon;
        } else {
            self.epsilon *= config.epsilon_decay;
        }
    }

    fn learn(&mut self, episode: &Episode, config: &TrainConfig, window: &mut UpdateWindow) {
        for (reward, trajectory) in episode.rewards.iter().zip(&episode.trajectories) {
            let last = trajectory.len().saturating_sub(1);
            for (t, (obs, action)) in trajectory.iter().enumerate() {
                let ret = reward * config.gamma.powi((last - t) as i32);
                if let Some(q) = self.table.get_mut(obs) {
                    let update = config.learning_rate * (ret - q[action.index()]);
                    q[action.index()] += update;
                    window.push(update);
                }
            }
        }
    }
}

/// Running mean of observed returns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueStat {
    pub total: f64,
    pub visits: u64,
}

impl ValueStat {
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total / self.visits as f64
        }
    }
}

/// Monte Carlo estimate of state values under one fixed policy.
///
/// Every observation in a gambler's trajectory is credited with that
/// gambler's final reward; the estimate is the average over all visits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueEstimate {
    stats: BTreeMap<Observation, ValueStat>,
    episodes: usize,
}

impl ValueEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, obs: Observation, ret: f64) {
        let stat = self.stats.entry(obs).or_default();
        stat.total += ret;
        stat.visits += 1;
    }

    pub fn record_episode(&mut self, episode: &Episode) {
        for (reward, trajectory) in episode.rewards.iter().zip(&episode.trajectories) {
            for (obs, _) in trajectory {
                self.record(*obs, *reward);
            }
        }
        self.episodes += 1;
    }

    pub fn merge(&mut self, other: &ValueEstimate) {
        for (obs, stat) in &other.stats {
            let mine = self.stats.entry(*obs).or_default();
            mine.total += stat.total;
            mine.visits += stat.visits;
        }
        self.episodes += other.episodes;
    }

    pub fn value(&self, obs: &Observation) -> Option<f64> {
        self.stats.get(obs).map(ValueStat::mean)
    }

    pub fn visits(&self, obs: &Observation) -> u64 {
        self.stats.get(obs).map_or(0, |s| s.visits)
    }

    /// Episodes folded into this estimate.
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Observations in ascending order with their statistics.
    pub fn iter(&self) -> impl Iterator<Item = (&Observation, &ValueStat)> {
        self.stats.iter()
    }
}

/// Estimate the state values of `policy` from `episodes` episodes on `game`.
pub fn evaluate_policy<P: Policy + ?Sized>(
    game: &mut Game,
    policy: &mut P,
    episodes: usize,
) -> Result<ValueEstimate, PolicyError> {
    let mut estimate = ValueEstimate::new();
    for _ in 0..episodes {
        let episode = game.play(policy)?;
        estimate.record_episode(&episode);
    }
    debug!(
        policy = policy.name(),
        episodes,
        states = estimate.len(),
        "policy evaluated"
    );
    Ok(estimate)
}
