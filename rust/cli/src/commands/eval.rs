//! Policy evaluation command handler.
//!
//! Runs Monte Carlo prediction for a fixed policy across rayon workers and
//! writes the average return of every observation as CSV, one row per
//! `(player_points, dealer_showing, usable_ace)`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use blackjack_ai::create_policy;
use blackjack_ai::mc::ValueEstimate;
use blackjack_ai::rollout::{RolloutConfig, evaluate_parallel};

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;

pub const CSV_HEADER: &str = "player_points,dealer_showing,usable_ace,value,visits";

fn write_csv(estimate: &ValueEstimate, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", CSV_HEADER)?;
    for (obs, stat) in estimate.iter() {
        writeln!(
            w,
            "{},{},{},{:.6},{}",
            obs.player_points,
            obs.dealer_showing,
            u8::from(obs.usable_ace),
            stat.mean(),
            stat.visits
        )?;
    }
    Ok(())
}

/// Handle the eval command.
///
/// The policy is rebuilt inside every worker from that worker's seed, so
/// learners and random policies never share a generator.
pub fn handle_eval_command(
    config: &Config,
    policy: &str,
    workers: usize,
    output: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let rollout = RolloutConfig {
        decks: config.decks,
        players: config.players,
        seed: config.seed.unwrap_or_else(rand::random),
        workers,
    };
    let estimate = evaluate_parallel(&rollout, config.episodes as usize, |seed| {
        create_policy(policy, seed)
    })?;

    match output {
        Some(path) => {
            let path = Path::new(&path);
            ensure_parent_dir(path).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            let mut w = BufWriter::new(File::create(path)?);
            write_csv(&estimate, &mut w)?;
            w.flush()?;
            writeln!(
                out,
                "Evaluated {} over {} episodes: {} observations written to {}",
                policy,
                estimate.episodes(),
                estimate.len(),
                path.display()
            )?;
        }
        None => write_csv(&estimate, out)?,
    }
    Ok(())
}
