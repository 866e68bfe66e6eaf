//! Training command handler: runs one tabular learner and saves its value
//! table as JSON for `greedy:PATH` policies.

use std::io::Write;

use blackjack_ai::learner::{Learner, TrainConfig, TrainReport, train};
use blackjack_ai::mc::MonteCarloControl;
use blackjack_ai::qtable::QTable;
use blackjack_ai::td::{QLearning, Sarsa};
use blackjack_engine::game::Game;

use crate::cli::Algorithm;
use crate::config::Config;
use crate::error::CliError;

/// Learner hyper-parameters taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct TrainOptions {
    pub algo: Algorithm,
    pub learning_rate: Option<f64>,
    pub gamma: f64,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub eps_min: f64,
    pub check_every: usize,
    pub stop_at_convergence: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        let d = TrainConfig::default();
        Self {
            algo: Algorithm::Mc,
            learning_rate: None,
            gamma: d.gamma,
            epsilon: d.epsilon,
            epsilon_decay: d.epsilon_decay,
            eps_min: d.eps_min,
            check_every: d.check_every,
            stop_at_convergence: d.stop_at_convergence,
        }
    }
}

impl TrainOptions {
    fn train_config(&self, episodes: u64) -> TrainConfig {
        let learning_rate = self.learning_rate.unwrap_or(match self.algo {
            Algorithm::Sarsa => 0.01,
            Algorithm::Mc | Algorithm::Qlearning => 0.1,
        });
        TrainConfig {
            episodes: episodes as usize,
            learning_rate,
            gamma: self.gamma,
            epsilon: self.epsilon,
            epsilon_decay: self.epsilon_decay,
            eps_min: self.eps_min,
            check_every: self.check_every,
            stop_at_convergence: self.stop_at_convergence,
        }
    }
}

fn run_learner<L: Learner>(
    mut learner: L,
    game: &mut Game,
    config: &TrainConfig,
    into_table: fn(L) -> QTable,
) -> Result<(TrainReport, QTable), CliError> {
    let report = train(&mut learner, game, config)?;
    Ok((report, into_table(learner)))
}

/// Handle the train command.
///
/// # Errors
///
/// `CliError::InvalidInput` for out-of-range hyper-parameters, `CliError::Io`
/// if the table cannot be written.
pub fn handle_train_command(
    config: &Config,
    options: &TrainOptions,
    output: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let train_config = options.train_config(config.episodes);
    train_config.validate()?;
    let mut game = Game::with_seed(config.decks, config.players, seed)?;

    let (report, table) = match options.algo {
        Algorithm::Mc => run_learner(
            MonteCarloControl::new(seed),
            &mut game,
            &train_config,
            MonteCarloControl::into_table,
        )?,
        Algorithm::Sarsa => run_learner(
            Sarsa::new(seed),
            &mut game,
            &train_config,
            Sarsa::into_table,
        )?,
        Algorithm::Qlearning => run_learner(
            QLearning::new(seed),
            &mut game,
            &train_config,
            QLearning::into_table,
        )?,
    };
    table.save(output)?;

    writeln!(
        out,
        "Trained {} for {} episodes{}",
        options.algo.as_str(),
        report.episodes_run,
        if report.converged { " (converged)" } else { "" }
    )?;
    writeln!(
        out,
        "Final epsilon {:.4}, {} unvisited state-actions",
        report.final_epsilon, report.unseen
    )?;
    writeln!(out, "Saved value table to {}", output)?;
    Ok(())
}
