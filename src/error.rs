use std::path::PathBuf;

use crate::game::{Command, GamePhase};

/// Errors returned by engine commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{command} is not allowed while {phase}")]
    IllegalPhase { command: Command, phase: GamePhase },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Outcome, Player};

    #[test]
    fn test_illegal_phase_display() {
        let err = EngineError::IllegalPhase {
            command: Command::DropPiece,
            phase: GamePhase::AwaitingStart,
        };
        assert_eq!(err.to_string(), "drop_piece is not allowed while awaiting start");

        let err = EngineError::IllegalPhase {
            command: Command::StartGame,
            phase: GamePhase::RoundOver(Outcome::Win(Player::Two)),
        };
        assert_eq!(
            err.to_string(),
            "start_game is not allowed while round over (Player #2 wins)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board.columns must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board.columns must be > 0"
        );
    }
}
