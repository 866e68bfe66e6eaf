use serde::{Deserialize, Serialize};

/// A seat's move on its turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw one more card
    Hit = 0,
    /// Stop drawing for the rest of the episode
    Stick = 1,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Hit, Action::Stick];

    /// Position of the action in a value-table row.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Action> {
        match i {
            0 => Some(Action::Hit),
            1 => Some(Action::Stick),
            _ => None,
        }
    }
}

/// What a gambler sees when asked to act.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Observation {
    /// Own hand total, in `12..=21` at every real decision point
    pub player_points: u8,
    /// Dealer's face-up card, capped at 10 (ace shows as 1)
    pub dealer_showing: u8,
    pub usable_ace: bool,
}

impl Observation {
    pub fn new(player_points: u8, dealer_showing: u8, usable_ace: bool) -> Self {
        Self {
            player_points,
            dealer_showing,
            usable_ace,
        }
    }
}

/// Decision interface consumed by the episode engine.
///
/// Learners, scripted players and loaded value tables all implement this
/// trait independently. `q` exposes per-action value estimates for tooling;
/// the engine itself only ever calls `predict`.
pub trait Policy {
    fn predict(&mut self, observation: &Observation) -> Action;

    /// Value estimates indexed by [`Action::index`], if the policy has any.
    fn q(&self, _observation: &Observation) -> Option<[f64; 2]> {
        None
    }

    fn name(&self) -> &str;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn predict(&mut self, observation: &Observation) -> Action {
        (**self).predict(observation)
    }

    fn q(&self, observation: &Observation) -> Option<[f64; 2]> {
        (**self).q(observation)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
