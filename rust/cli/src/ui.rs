//! Terminal output helpers shared by the commands.

use std::io::Write;

use blackjack_engine::game::Episode;
use blackjack_engine::player::{Player, Role};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// One line per seat, e.g. `  seat 0 gambler  10♦ 9♦       = 19  Win`.
pub fn format_seat(player: &Player) -> String {
    let role = match player.role() {
        Role::Gambler => "gambler",
        Role::Dealer => "dealer",
    };
    let cards: Vec<String> = player
        .hand()
        .plain_cards()
        .iter()
        .map(|c| c.to_string())
        .collect();
    format!(
        "  seat {} {:<7}  {:<16} = {:>2}  {:?}",
        player.id(),
        role,
        cards.join(" "),
        player.points(),
        player.status()
    )
}

pub fn format_rewards(episode: &Episode) -> String {
    let parts: Vec<String> = episode
        .rewards
        .iter()
        .map(|r| format!("{:+.1}", r))
        .collect();
    format!("[{}]", parts.join(", "))
}
