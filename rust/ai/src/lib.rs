//! # blackjack-ai: Policies and Learners for the Blackjack Environment
//!
//! Decision-making agents for `blackjack-engine` episodes, from fixed scripts
//! to tabular reinforcement learners.
//!
//! ## Core Components
//!
//! - [`scripted`] - Threshold and uniformly random policies
//! - [`qtable`] - Tabular action values and the greedy policy over them
//! - [`learner`] - Training configuration, convergence window and the shared training loop
//! - [`mc`] - Monte Carlo control and Monte Carlo prediction of state values
//! - [`td`] - SARSA and Q-learning
//! - [`rollout`] - Parallel episode collection on rayon
//! - [`create_policy`] - Factory for policies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_ai::learner::{train, TrainConfig};
//! use blackjack_ai::mc::MonteCarloControl;
//! use blackjack_engine::game::Game;
//!
//! let mut game = Game::with_seed(0, 2, 7).unwrap();
//! let mut learner = MonteCarloControl::new(7);
//! let config = TrainConfig { episodes: 200, ..TrainConfig::default() };
//! let report = train(&mut learner, &mut game, &config).unwrap();
//! assert!(report.episodes_run <= 200);
//! ```
//!
//! ## Policy Names
//!
//! - `"threshold"` / `"threshold:N"` - stick at 20 (or N) and above
//! - `"random"` - uniform HIT/STICK
//! - `"dealer"` - the dealer's own rule
//! - `"greedy:PATH"` - greedy over a value table saved as JSON
//! - `"mc"`, `"sarsa"`, `"qlearning"` - untrained learners acting ε-greedily

use blackjack_engine::policy::Policy;
use blackjack_engine::rules::DealerPolicy;

pub mod error;
pub mod learner;
pub mod mc;
pub mod qtable;
pub mod rollout;
pub mod scripted;
pub mod td;

pub use error::PolicyError;

/// Build a policy from its name.
///
/// # Example
///
/// ```rust
/// use blackjack_ai::create_policy;
/// use blackjack_engine::policy::Policy;
///
/// let policy = create_policy("threshold:17", 0).unwrap();
/// assert_eq!(policy.name(), "threshold");
/// assert!(create_policy("card-counter", 0).is_err());
/// ```
pub fn create_policy(name: &str, seed: u64) -> Result<Box<dyn Policy + Send>, PolicyError> {
    let (kind, arg) = match name.split_once(':') {
        Some((k, a)) => (k, Some(a)),
        None => (name, None),
    };
    let policy: Box<dyn Policy + Send> = match (kind, arg) {
        ("threshold", None) => Box::new(scripted::ThresholdPolicy::default()),
        ("threshold", Some(n)) => {
            let threshold = n.parse::<u8>().map_err(|_| {
                PolicyError::UnknownPolicy(format!("{} (threshold must be 0-255)", name))
            })?;
            Box::new(scripted::ThresholdPolicy::new(threshold))
        }
        ("random", None) => Box::new(scripted::RandomPolicy::with_seed(seed)),
        ("dealer", None) => Box::new(DealerPolicy),
        ("greedy", Some(path)) => Box::new(qtable::GreedyPolicy::load(path, seed)?),
        ("mc", None) => Box::new(mc::MonteCarloControl::new(seed)),
        ("sarsa", None) => Box::new(td::Sarsa::new(seed)),
        ("qlearning", None) => Box::new(td::QLearning::new(seed)),
        _ => return Err(PolicyError::UnknownPolicy(name.to_string())),
    };
    Ok(policy)
}
