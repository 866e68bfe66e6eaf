//! # Blackjack CLI Library
//!
//! Command-line harness for the multi-player Blackjack environment: play
//! episodes, record them, train tabular learners and evaluate policies.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments and dispatches to a subcommand, writing to the
//! given streams and returning the process exit code.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = blackjack_cli::run(["blackjack", "rng", "--seed", "42"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().starts_with("RNG sample"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play episodes with a policy or interactively (`--human`)
//! - `sim`: Simulate episodes and write JSONL episode records
//! - `train`: Train Monte Carlo, SARSA or Q-learning and save the value table
//! - `eval`: Estimate a policy's state values in parallel, CSV output
//! - `cfg`: Display the resolved configuration and value sources
//! - `rng`: Print seeded RNG and card samples

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{BlackjackCli, Commands};
use commands::{
    TrainOptions, handle_cfg_command, handle_eval_command, handle_play_command,
    handle_rng_command, handle_sim_command, handle_train_command,
};
use config::{ConfigResolved, Overrides};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "train", "eval", "cfg", "rng"];

/// Main entry point for the CLI application.
///
/// Returns `0` on success, `2` on any error and `130` when an interactive
/// session or a simulation is interrupted.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Rng { seed } => handle_rng_command(seed, out),
        Commands::Play {
            table,
            episodes,
            policy,
            human,
        } => resolve(table.overrides(Some(episodes))).and_then(|r| {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&r.config, &policy, human, out, &mut stdin_lock)
        }),
        Commands::Sim {
            table,
            episodes,
            policy,
            output,
        } => resolve(table.overrides(episodes))
            .and_then(|r| handle_sim_command(&r.config, &policy, output, out)),
        Commands::Train {
            table,
            episodes,
            algo,
            learning_rate,
            gamma,
            epsilon,
            epsilon_decay,
            eps_min,
            check_every,
            no_early_stop,
            output,
        } => {
            let options = TrainOptions {
                algo,
                learning_rate,
                gamma,
                epsilon,
                epsilon_decay,
                eps_min,
                check_every,
                stop_at_convergence: !no_early_stop,
            };
            resolve(table.overrides(episodes))
                .and_then(|r| handle_train_command(&r.config, &options, &output, out))
        }
        Commands::Eval {
            table,
            episodes,
            policy,
            workers,
            output,
        } => resolve(table.overrides(episodes))
            .and_then(|r| handle_eval_command(&r.config, &policy, workers, output, out)),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = writeln!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn resolve(overrides: Overrides) -> Result<ConfigResolved, CliError> {
    Ok(config::resolve(overrides)?)
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err);
    let _ = writeln!(err, "Blackjack CLI");
    let _ = writeln!(err, "Usage: blackjack <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: blackjack --help");
    exit_code::ERROR
}
