//! Error types for the CLI application.
//!
//! Engine and deck errors are wrapped so command handlers can use `?` on
//! every layer and [`crate::run`] can map the result to an exit code.

use std::fmt;

use pazaak_engine::errors::{DeckError, GameError};

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),

    /// Input ended before the session finished
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<DeckError> for CliError {
    fn from(error: DeckError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pazaak_engine::game::Seat;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = GameError::AlreadyDrawn(Seat::Opponent).into();
        assert!(matches!(e, CliError::Engine(_)));
        assert_eq!(e.to_string(), "Engine error: opponent already drew this turn");
    }

    #[test]
    fn deck_errors_are_input_errors() {
        let e: CliError = DeckError::MainCardInSideDeck.into();
        assert!(matches!(e, CliError::InvalidInput(_)));
    }

    #[test]
    fn only_io_errors_have_a_source() {
        use std::error::Error;
        let io = CliError::Io(std::io::Error::other("disk"));
        assert!(io.source().is_some());
        assert!(CliError::Config("x".into()).source().is_none());
    }
}
