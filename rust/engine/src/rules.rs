//! Fixed table rules: thresholds, rewards and the dealer's decision rule.

use crate::policy::{Action, Observation, Policy};

/// Best possible hand total
pub const BLACKJACK: u8 = 21;

/// Extra points of an ace counted as 11 instead of 1
pub const ACE_BONUS: u8 = 10;

/// The dealer sticks on any total at or above this value
pub const DEALER_STICK_THRESHOLD: u8 = 17;

/// A gambler below this total is always hit without consulting its policy.
/// No card can bust such a hand, so hitting is always optimal and the
/// decision is elided: policies only ever see totals of 12 and above.
pub const FORCED_HIT_BELOW: u8 = 12;

pub const REWARD_WIN: f64 = 1.0;
pub const REWARD_LOSE: f64 = -1.0;
pub const REWARD_DRAW: f64 = 0.0;
pub const REWARD_NATURAL: f64 = 1.5;

/// The dealer's fixed rule: stick on 17 or more, hit otherwise.
pub fn dealer_action(points: u8) -> Action {
    if points >= DEALER_STICK_THRESHOLD {
        Action::Stick
    } else {
        Action::Hit
    }
}

/// The dealer rule as a [`Policy`], for callers that want to seat a
/// dealer-like gambler.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerPolicy;

impl Policy for DealerPolicy {
    fn predict(&mut self, observation: &Observation) -> Action {
        dealer_action(observation.player_points)
    }

    fn name(&self) -> &str {
        "dealer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealer_hits_sixteen_and_sticks_seventeen() {
        assert_eq!(dealer_action(16), Action::Hit);
        assert_eq!(dealer_action(17), Action::Stick);
        assert_eq!(dealer_action(21), Action::Stick);
    }

    #[test]
    fn dealer_policy_reads_player_points() {
        let mut p = DealerPolicy;
        assert_eq!(p.predict(&Observation::new(12, 10, false)), Action::Hit);
        assert_eq!(p.predict(&Observation::new(18, 1, true)), Action::Stick);
    }
}
