//! Data-parallel episode collection.
//!
//! Each worker owns its own [`Game`] and its own policy instance; nothing is
//! shared between workers while they play.

use blackjack_engine::game::{Episode, Game, GameStatus};
use blackjack_engine::policy::Policy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PolicyError;
use crate::mc::{ValueEstimate, evaluate_policy};

/// Table setup shared by every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutConfig {
    pub decks: u32,
    pub players: usize,
    /// Base seed; worker seeds are derived from it
    pub seed: u64,
    /// 0 uses rayon's current thread count
    pub workers: usize,
}

impl RolloutConfig {
    fn worker_count(&self) -> usize {
        if self.workers == 0 {
            rayon::current_num_threads()
        } else {
            self.workers
        }
    }
}

/// Seed of worker `index`, stable for a given base seed.
pub fn worker_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run `episodes` episodes split across workers, folding each worker's
/// episodes into its own accumulator as they are played. Accumulators come
/// back in worker order.
fn fold_workers<P, F, A, G>(
    config: &RolloutConfig,
    episodes: usize,
    make_policy: F,
    fold: G,
) -> Result<Vec<A>, PolicyError>
where
    P: Policy,
    F: Fn(u64) -> Result<P, PolicyError> + Sync,
    A: Send,
    G: Fn(&mut Game, &mut P, usize) -> Result<A, PolicyError> + Sync,
{
    let workers = config.worker_count().min(episodes).max(1);
    let per_worker = episodes / workers;
    let extra = episodes % workers;
    info!(
        episodes,
        workers,
        decks = config.decks,
        players = config.players,
        "running rollout workers"
    );

    (0..workers)
        .into_par_iter()
        .map(|w| {
            let seed = worker_seed(config.seed, w);
            let mut game = Game::with_seed(config.decks, config.players, seed)?;
            let mut policy = make_policy(seed)?;
            fold(&mut game, &mut policy, per_worker + usize::from(w < extra))
        })
        .collect()
}

/// Play `episodes` episodes split across workers.
///
/// `make_policy` builds one policy per worker from that worker's seed.
/// Episodes come back grouped by worker in worker order, so a fixed base seed
/// and worker count always yield the same result.
pub fn collect_parallel<P, F>(
    config: &RolloutConfig,
    episodes: usize,
    make_policy: F,
) -> Result<Vec<Episode>, PolicyError>
where
    P: Policy,
    F: Fn(u64) -> Result<P, PolicyError> + Sync,
{
    let batches = fold_workers(config, episodes, make_policy, |game, policy, count| {
        (0..count)
            .map(|_| game.play(policy).map_err(PolicyError::from))
            .collect::<Result<Vec<_>, _>>()
    })?;
    Ok(batches.into_iter().flatten().collect())
}

/// Parallel Monte Carlo prediction: per-worker estimates merged in worker order.
///
/// Workers fold episodes into their estimate as they play, so memory does not
/// grow with the episode count.
pub fn evaluate_parallel<P, F>(
    config: &RolloutConfig,
    episodes: usize,
    make_policy: F,
) -> Result<ValueEstimate, PolicyError>
where
    P: Policy,
    F: Fn(u64) -> Result<P, PolicyError> + Sync,
{
    let partials = fold_workers(config, episodes, make_policy, |game, policy, count| {
        evaluate_policy(game, policy, count)
    })?;
    let mut estimate = ValueEstimate::new();
    for partial in &partials {
        estimate.merge(partial);
    }
    Ok(estimate)
}

/// Aggregate outcome counts over a batch of episodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RolloutSummary {
    pub episodes: usize,
    pub ended: usize,
    pub naturals: usize,
    pub draws: usize,
    /// Per-gambler rewards above, below and at zero
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub mean_reward: f64,
}

impl RolloutSummary {
    /// Fold one finished episode into the counts.
    pub fn record(&mut self, episode: &Episode) {
        self.episodes += 1;
        match episode.status {
            GameStatus::End => self.ended += 1,
            GameStatus::Natural => self.naturals += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::Playing => {}
        }
        for r in &episode.rewards {
            if *r > 0.0 {
                self.wins += 1;
            } else if *r < 0.0 {
                self.losses += 1;
            } else {
                self.pushes += 1;
            }
            let seen = (self.wins + self.losses + self.pushes) as f64;
            self.mean_reward += (r - self.mean_reward) / seen;
        }
    }
}

pub fn summarize(episodes: &[Episode]) -> RolloutSummary {
    let mut s = RolloutSummary::default();
    for e in episodes {
        s.record(e);
    }
    s
}
