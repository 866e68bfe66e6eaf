//! Fixed, non-learning policies used as baselines and for evaluation.

use blackjack_engine::policy::{Action, Observation, Policy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Sticks on totals at or above 20 unless configured otherwise
pub const DEFAULT_THRESHOLD: u8 = 20;

/// Hits below `threshold`, sticks otherwise.
///
/// With the default threshold this is the reference policy whose state values
/// the Monte Carlo prediction tooling estimates.
///
/// # Example
///
/// ```rust
/// use blackjack_ai::scripted::ThresholdPolicy;
/// use blackjack_engine::policy::{Action, Observation, Policy};
///
/// let mut policy = ThresholdPolicy::default();
/// assert_eq!(policy.predict(&Observation::new(19, 10, false)), Action::Hit);
/// assert_eq!(policy.predict(&Observation::new(20, 10, false)), Action::Stick);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    threshold: u8,
}

impl ThresholdPolicy {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Policy for ThresholdPolicy {
    fn predict(&mut self, observation: &Observation) -> Action {
        if observation.player_points < self.threshold {
            Action::Hit
        } else {
            Action::Stick
        }
    }

    fn name(&self) -> &str {
        "threshold"
    }
}

/// Picks HIT or STICK uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn predict(&mut self, _observation: &Observation) -> Action {
        if self.rng.random_bool(0.5) {
            Action::Hit
        } else {
            Action::Stick
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary() {
        let mut p = ThresholdPolicy::new(17);
        assert_eq!(p.predict(&Observation::new(16, 2, true)), Action::Hit);
        assert_eq!(p.predict(&Observation::new(17, 2, true)), Action::Stick);
        assert_eq!(p.threshold(), 17);
    }

    #[test]
    fn random_policy_uses_both_actions() {
        let mut p = RandomPolicy::with_seed(3);
        let obs = Observation::new(15, 7, false);
        let hits = (0..200)
            .filter(|_| p.predict(&obs) == Action::Hit)
            .count();
        assert!(hits > 50 && hits < 150, "hits = {}", hits);
    }

    #[test]
    fn random_policy_is_reproducible() {
        let obs = Observation::new(13, 4, false);
        let mut a = RandomPolicy::with_seed(9);
        let mut b = RandomPolicy::with_seed(9);
        for _ in 0..32 {
            assert_eq!(a.predict(&obs), b.predict(&obs));
        }
    }
}
