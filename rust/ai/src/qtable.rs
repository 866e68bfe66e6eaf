//! Tabular action values over the 10×10×2 decision space and the greedy
//! policy that reads them.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use blackjack_engine::policy::{Action, Observation, Policy};
use blackjack_engine::rules::{BLACKJACK, FORCED_HIT_BELOW};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Player totals covered by the table: 12..=21
pub const POINT_ROWS: usize = (BLACKJACK - FORCED_HIT_BELOW + 1) as usize;
/// Dealer showing values covered by the table: 1..=10
pub const DEALER_COLUMNS: usize = 10;

type Values = [[[[f64; 2]; 2]; DEALER_COLUMNS]; POINT_ROWS];

/// Action values indexed `[player_points - 12][dealer_showing - 1][usable_ace][action]`.
///
/// Observations outside that range (bookkeeping predictions on a dealt
/// natural with a low total, for instance) have no entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QTable {
    q: Values,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(obs: &Observation) -> Option<(usize, usize, usize)> {
        let row = obs.player_points.checked_sub(FORCED_HIT_BELOW)? as usize;
        let col = obs.dealer_showing.checked_sub(1)? as usize;
        if row >= POINT_ROWS || col >= DEALER_COLUMNS {
            return None;
        }
        Some((row, col, obs.usable_ace as usize))
    }

    pub fn contains(obs: &Observation) -> bool {
        Self::index(obs).is_some()
    }

    /// Both action values for `obs`, in [`Action::index`] order.
    pub fn get(&self, obs: &Observation) -> Option<[f64; 2]> {
        let (r, c, a) = Self::index(obs)?;
        Some(self.q[r][c][a])
    }

    pub fn get_mut(&mut self, obs: &Observation) -> Option<&mut [f64; 2]> {
        let (r, c, a) = Self::index(obs)?;
        Some(&mut self.q[r][c][a])
    }

    pub fn value(&self, obs: &Observation, action: Action) -> Option<f64> {
        self.get(obs).map(|q| q[action.index()])
    }

    /// Largest action value for `obs`.
    pub fn max_value(&self, obs: &Observation) -> Option<f64> {
        self.get(obs).map(|q| q[0].max(q[1]))
    }

    /// Actions sharing the largest value for `obs`; empty when `obs` is out of range.
    pub fn best_actions(&self, obs: &Observation) -> Vec<Action> {
        match self.get(obs) {
            Some(q) => {
                let best = q[0].max(q[1]);
                Action::ALL
                    .iter()
                    .copied()
                    .filter(|a| q[a.index()] == best)
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// Greedy action with a random tie-break. Out-of-range observations
    /// always hit.
    pub fn greedy<R: Rng>(&self, obs: &Observation, rng: &mut R) -> Action {
        self.best_actions(obs)
            .choose(rng)
            .copied()
            .unwrap_or(Action::Hit)
    }

    /// Explore with probability `epsilon`, otherwise act greedily.
    pub fn epsilon_greedy<R: Rng>(
        &self,
        obs: &Observation,
        epsilon: f64,
        rng: &mut R,
    ) -> Action {
        if rng.random::<f64>() < epsilon {
            Action::ALL[rng.random_range(0..Action::ALL.len())]
        } else {
            self.greedy(obs, rng)
        }
    }

    /// Number of state-action pairs still holding exactly zero.
    pub fn unseen(&self) -> usize {
        self.entries()
            .map(|(_, q)| q.iter().filter(|v| **v == 0.0).count())
            .sum()
    }

    /// Every observation the table covers with its action values.
    pub fn entries(&self) -> impl Iterator<Item = (Observation, [f64; 2])> + '_ {
        (0..POINT_ROWS).flat_map(move |r| {
            (0..DEALER_COLUMNS).flat_map(move |c| {
                [false, true].into_iter().map(move |ace| {
                    let obs = Observation::new(
                        r as u8 + FORCED_HIT_BELOW,
                        c as u8 + 1,
                        ace,
                    );
                    (obs, self.q[r][c][ace as usize])
                })
            })
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PolicyError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut w, self)?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let r = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(r)?)
    }
}

/// Acts greedily with respect to a fixed [`QTable`].
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    table: QTable,
    rng: ChaCha20Rng,
}

impl GreedyPolicy {
    pub fn new(table: QTable, seed: u64) -> Self {
        Self {
            table,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P, seed: u64) -> Result<Self, PolicyError> {
        Ok(Self::new(QTable::load(path)?, seed))
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }
}

impl Policy for GreedyPolicy {
    fn predict(&mut self, observation: &Observation) -> Action {
        self.table.greedy(observation, &mut self.rng)
    }

    fn q(&self, observation: &Observation) -> Option<[f64; 2]> {
        self.table.get(observation)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
