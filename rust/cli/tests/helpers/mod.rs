//! Shared helpers for the integration suite.
//!
//! - [`run_cli`] calls `blackjack_cli::run` in-process and captures both
//!   streams and the exit code.
//! - [`clear_config_env`] removes every `BLACKJACK_*` variable the
//!   configuration layer reads. Tests touching the environment are `#[serial]`.

use std::path::PathBuf;

pub const CONFIG_KEYS: [&str; 5] = [
    "BLACKJACK_CONFIG",
    "BLACKJACK_DECKS",
    "BLACKJACK_PLAYERS",
    "BLACKJACK_SEED",
    "BLACKJACK_EPISODES",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv = std::iter::once("blackjack").chain(args.iter().copied());
    let exit_code = blackjack_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

pub fn clear_config_env() {
    for key in CONFIG_KEYS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

/// Unique path under a fresh temporary directory; the directory lives as
/// long as the returned guard.
pub fn temp_path(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    (dir, path)
}
