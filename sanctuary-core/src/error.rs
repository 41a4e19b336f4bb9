//! Error types for the simulation engine.

use std::fmt;

use thiserror::Error;

/// Why a mutating call was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalState {
    /// No session is running (before `start_game` or after returning to the menu).
    NoSession,
    /// The session has reached a terminal condition.
    Terminated,
    /// Today's event has already been answered.
    NoPendingEvent,
}

impl fmt::Display for IllegalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalState::NoSession => write!(f, "no game in progress"),
            IllegalState::Terminated => write!(f, "the game is over"),
            IllegalState::NoPendingEvent => write!(f, "no event is waiting for a choice"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown role: {0}")]
    InvalidRole(String),

    #[error("unknown location: {0}")]
    InvalidLocation(String),

    #[error("choice is not offered by the current event: {label}")]
    UnknownChoice { label: String },

    #[error("illegal state: {0}")]
    IllegalState(IllegalState),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_text() {
        assert_eq!(
            EngineError::InvalidRole("mayor".to_string()).to_string(),
            "unknown role: mayor"
        );
        assert_eq!(
            EngineError::IllegalState(IllegalState::Terminated).to_string(),
            "illegal state: the game is over"
        );
        assert!(EngineError::UnknownChoice {
            label: "Run".to_string()
        }
        .to_string()
        .contains("Run"));
    }
}
