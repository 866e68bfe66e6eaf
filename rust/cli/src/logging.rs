//! Diagnostic logging for the `blackjack` binary.
//!
//! Engine and learner events go through `tracing`. The subscriber writes to
//! stderr so that stdout stays clean for CSV and JSON output. Verbosity is
//! controlled with `RUST_LOG`, e.g. `RUST_LOG=blackjack_ai=info`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

const DEFAULT_FILTER: &str = "warn";

/// Install the global fmt subscriber. Fails if one is already installed.
pub fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("Failed to set tracing subscriber: {}", e))
}
