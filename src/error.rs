//! Error types for the parlor games engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParlorError {
    /// User input that failed to parse or fell outside the offered range.
    /// Always recovered locally by re-prompting; it never ends a match.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A move outside the current legal set. Reaching a user-facing surface
    /// with this is a programming defect, not a recoverable condition.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// Unusable configuration (zero winning score, bad grid size). Fails
    /// fast at startup.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ParlorError>;
