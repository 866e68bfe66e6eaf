//! Random number generator inspection command.
//!
//! Prints raw ChaCha20 output and the first cards an infinite deck deals for
//! the same seed, to check that seeded runs are reproducible.

use crate::error::CliError;
use blackjack_engine::deck::Deck;
use rand::{RngCore, SeedableRng};
use std::io::Write;

const SAMPLE: usize = 5;

/// Handle the rng command.
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let vals: Vec<u64> = (0..SAMPLE).map(|_| rng.next_u64()).collect();
    writeln!(out, "RNG sample: {:?}", vals)?;

    let cards = Deck::new_with_seed(0, s).deal(SAMPLE)?;
    let cards: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    writeln!(out, "Card sample: {}", cards.join(" "))?;
    Ok(())
}
