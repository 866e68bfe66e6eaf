//! Command handler modules for the `blackjack` CLI.
//!
//! Each subcommand lives in its own module and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`. Output
//! streams are passed in as `&mut dyn Write`; episode-running commands
//! receive the already resolved [`crate::config::Config`].

pub mod cfg;
pub mod eval;
pub mod play;
pub mod rng;
pub mod sim;
pub mod train;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
pub use train::{TrainOptions, handle_train_command};
