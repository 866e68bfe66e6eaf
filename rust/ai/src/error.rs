use blackjack_engine::errors::GameError;
use thiserror::Error;

/// Errors raised while building, training or persisting policies.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),
    #[error("Invalid training parameter: {0}")]
    InvalidParameter(String),
    #[error("Value table I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Value table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] GameError),
}
