//! Simulation command handler.
//!
//! Plays episodes with one policy and, when `--output` is given, records every
//! episode as one JSON line through [`EpisodeLogger`].
//!
//! # Environment Variables
//!
//! - `BLACKJACK_SIM_BREAK_AFTER`: stop after N episodes, as if interrupted

use std::io::Write;
use std::path::PathBuf;

use blackjack_ai::create_policy;
use blackjack_ai::rollout::RolloutSummary;
use blackjack_engine::game::Game;
use blackjack_engine::logger::{EpisodeLogger, EpisodeRecord};

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;

/// Handle the sim command.
///
/// Episodes run serially on one table seeded from the configuration (or a
/// random seed), so a fixed seed reproduces the same records.
pub fn handle_sim_command(
    config: &Config,
    policy: &str,
    output: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let total = config.episodes;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut game = Game::with_seed(config.decks, config.players, seed)?;
    let mut policy = create_policy(policy, seed)?;

    let mut logger = match output.map(PathBuf::from) {
        Some(path) => {
            ensure_parent_dir(&path).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            let logger = EpisodeLogger::create(&path).map_err(|e| {
                CliError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to open output file: {}", e),
                ))
            })?;
            Some(logger)
        }
        None => None,
    };

    let break_after = std::env::var("BLACKJACK_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let mut s = RolloutSummary::default();
    for completed in 1..=total {
        let episode = game.play(&mut policy)?;
        if let Some(l) = logger.as_mut() {
            let record = EpisodeRecord::from_game(l.next_id(), Some(seed), &game, &episode);
            l.write(&record)?;
        }
        s.record(&episode);

        if let Some(b) = break_after
            && completed == b
            && completed < total
        {
            if let Some(l) = logger.as_mut() {
                l.flush()?;
            }
            writeln!(out, "Interrupted: saved {}/{}", completed, total)?;
            return Err(CliError::Interrupted(format!(
                "saved {}/{}",
                completed, total
            )));
        }
    }
    if let Some(l) = logger.as_mut() {
        l.flush()?;
    }

    writeln!(out, "Simulated: {} episodes", s.episodes)?;
    writeln!(
        out,
        "Outcomes: {} end, {} natural, {} draw; gamblers {} won, {} lost, {} pushed; mean reward {:+.3}",
        s.ended, s.naturals, s.draws, s.wins, s.losses, s.pushes, s.mean_reward
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_engine::game::GameStatus;

    fn config(episodes: u64) -> Config {
        Config {
            decks: 0,
            players: 4,
            seed: Some(3),
            episodes,
        }
    }

    #[test]
    fn writes_one_record_per_episode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sim.jsonl");
        let mut out = Vec::new();
        handle_sim_command(
            &config(12),
            "random",
            Some(path.to_string_lossy().into_owned()),
            &mut out,
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<EpisodeRecord> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 12);
        for r in &records {
            assert_eq!(r.seed, Some(3));
            assert_eq!(r.rewards.len(), 3);
            assert_eq!(r.seats.len(), 4);
            assert_ne!(r.status, GameStatus::Playing);
            assert!(r.ts.is_some());
        }
        assert!(records[0].episode_id.ends_with("-000001"));
        assert!(records[11].episode_id.ends_with("-000012"));
        assert!(String::from_utf8(out).unwrap().contains("Simulated: 12 episodes"));
    }

    #[test]
    fn same_seed_same_outcomes() {
        let run = || {
            let mut out = Vec::new();
            handle_sim_command(&config(30), "threshold", None, &mut out).unwrap();
            String::from_utf8(out).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn unknown_policy_fails_before_playing() {
        let mut out = Vec::new();
        let e = handle_sim_command(&config(1), "counting", None, &mut out).unwrap_err();
        assert!(matches!(e, CliError::InvalidInput(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn unwritable_output_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "x").unwrap();
        let path = file.join("sub").join("sim.jsonl");
        let mut out = Vec::new();
        let e = handle_sim_command(
            &config(2),
            "threshold",
            Some(path.to_string_lossy().into_owned()),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(e, CliError::Io(_)));
        assert!(out.is_empty());
    }
}
