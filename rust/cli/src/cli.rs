//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Multi-player Blackjack environment for training and evaluating agents"
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table setup shared by the episode-running commands. Unset flags fall back
/// to the layered configuration (see `blackjack cfg`).
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct TableArgs {
    /// Number of 52-card decks in the shoe, 0 for an infinite deck
    #[arg(long)]
    pub decks: Option<u32>,
    /// Seats at the table including the dealer
    #[arg(long)]
    pub players: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TableArgs {
    pub fn overrides(&self, episodes: Option<u64>) -> Overrides {
        Overrides {
            decks: self.decks,
            players: self.players,
            seed: self.seed,
            episodes,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Every-visit Monte Carlo control
    Mc,
    /// On-policy TD(0)
    Sarsa,
    /// Off-policy TD(0)
    Qlearning,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Mc => "mc",
            Algorithm::Sarsa => "sarsa",
            Algorithm::Qlearning => "qlearning",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play episodes and show every hand
    Play {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, default_value_t = 1)]
        episodes: u64,
        /// threshold[:N], random, dealer, greedy:PATH, mc, sarsa or qlearning
        #[arg(long, default_value = "threshold")]
        policy: String,
        /// Decide every gambler's moves from stdin
        #[arg(long)]
        human: bool,
    },
    /// Simulate episodes and record them as JSONL
    Sim {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        episodes: Option<u64>,
        #[arg(long, default_value = "threshold")]
        policy: String,
        #[arg(long)]
        output: Option<String>,
    },
    /// Train a tabular learner and save its value table as JSON
    Train {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        episodes: Option<u64>,
        #[arg(long, value_enum, default_value_t = Algorithm::Mc)]
        algo: Algorithm,
        /// Step size; defaults to 0.1 (mc, qlearning) or 0.01 (sarsa)
        #[arg(long)]
        learning_rate: Option<f64>,
        #[arg(long, default_value_t = 1.0)]
        gamma: f64,
        #[arg(long, default_value_t = 0.1)]
        epsilon: f64,
        #[arg(long, default_value_t = 0.995)]
        epsilon_decay: f64,
        #[arg(long, default_value_t = 0.05)]
        eps_min: f64,
        #[arg(long, default_value_t = 5)]
        check_every: usize,
        /// Run every episode even after the updates settle
        #[arg(long)]
        no_early_stop: bool,
        #[arg(long)]
        output: String,
    },
    /// Estimate state values of a policy and write them as CSV
    Eval {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        episodes: Option<u64>,
        #[arg(long, default_value = "threshold")]
        policy: String,
        /// Parallel workers, 0 for one per core
        #[arg(long, default_value_t = 0)]
        workers: usize,
        /// CSV destination; stdout when omitted
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a sample from the seeded generators
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}
