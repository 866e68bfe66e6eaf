//! Play command handler.
//!
//! Plays episodes with a named policy, or with every gambler decided from
//! stdin when `--human` is given, and prints each table after settlement.

use std::io::{BufRead, Write};

use blackjack_ai::create_policy;
use blackjack_engine::game::Game;
use blackjack_engine::policy::{Action, Observation, Policy};
use blackjack_engine::rules::BLACKJACK;

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::ui;

/// Reads HIT/STICK decisions from a line-based input.
///
/// Once the input is closed or the user quits, every remaining decision is
/// STICK and [`HumanPolicy::closed`] reports it.
struct HumanPolicy<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    out: &'a mut W,
    closed: bool,
}

impl<'a, R: BufRead, W: Write> HumanPolicy<'a, R, W> {
    fn new(input: &'a mut R, out: &'a mut W) -> Self {
        Self {
            input,
            out,
            closed: false,
        }
    }

    fn closed(&self) -> bool {
        self.closed
    }
}

fn parse_decision(line: &str) -> Option<Option<Action>> {
    match line.to_ascii_lowercase().as_str() {
        "h" | "hit" => Some(Some(Action::Hit)),
        "s" | "stick" | "stand" => Some(Some(Action::Stick)),
        "q" | "quit" => Some(None),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Policy for HumanPolicy<'_, R, W> {
    fn predict(&mut self, observation: &Observation) -> Action {
        // nothing to gain by drawing on 21
        if self.closed || observation.player_points >= BLACKJACK {
            return Action::Stick;
        }
        loop {
            let _ = write!(
                self.out,
                "Your total: {}{}, dealer shows {}. [h]it or [s]tick? ",
                observation.player_points,
                if observation.usable_ace { " (soft)" } else { "" },
                observation.dealer_showing
            );
            let _ = self.out.flush();
            match read_stdin_line(&mut *self.input).as_deref().map(parse_decision) {
                None | Some(Some(None)) => {
                    self.closed = true;
                    return Action::Stick;
                }
                Some(Some(Some(action))) => return action,
                Some(None) => {
                    let _ = writeln!(self.out, "Please answer h or s (q quits).");
                }
            }
        }
    }

    fn name(&self) -> &str {
        "human"
    }
}

/// Handle the play command.
///
/// # Errors
///
/// Returns `CliError::Interrupted` if stdin closes or the user quits during a
/// human session, and `CliError::InvalidInput` for an unknown policy name.
pub fn handle_play_command(
    config: &Config,
    policy: &str,
    human: bool,
    mut out: &mut dyn Write,
    mut input: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut game = Game::with_seed(config.decks, config.players, seed)?;
    let mut automatic = if human {
        None
    } else {
        Some(create_policy(policy, seed)?)
    };

    let mut total = 0.0;
    let mut rewards = 0usize;
    for i in 1..=config.episodes {
        writeln!(out, "Episode {} (seed {})", i, seed)?;
        let episode = match automatic.as_mut() {
            Some(p) => game.play(p)?,
            None => {
                let mut player = HumanPolicy::new(&mut input, &mut out);
                let episode = game.play(&mut player)?;
                if player.closed() {
                    return Err(CliError::Interrupted(format!(
                        "input closed after {} of {} episodes",
                        i - 1,
                        config.episodes
                    )));
                }
                episode
            }
        };

        for p in game.table().players() {
            writeln!(out, "{}", ui::format_seat(p))?;
        }
        writeln!(
            out,
            "Result: {:?}, rewards {}",
            episode.status,
            ui::format_rewards(&episode)
        )?;
        total += episode.rewards.iter().sum::<f64>();
        rewards += episode.rewards.len();
    }

    writeln!(
        out,
        "Played: {} episodes, mean reward {:+.3}",
        config.episodes,
        total / rewards.max(1) as f64
    )?;
    Ok(())
}
