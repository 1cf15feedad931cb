//! Error types for controller commands.

use crate::error::{ErrorSeverity, GameError};
use crate::rules::IllegalMove;
use crate::state::PlayerId;

use super::{GameStatus, Operation};

/// Errors surfaced by [`super::GameController`] commands.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("{operation} is not valid while {status}")]
    InvalidState {
        operation: Operation,
        status: GameStatus,
    },

    #[error("state change requested by {sender} while {active} is active")]
    SecurityViolation {
        sender: GameStatus,
        active: GameStatus,
    },

    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error("player {0} is not a detective of this game")]
    UnknownPlayer(PlayerId),

    #[error("cannot start a game without players")]
    NoPlayers,

    #[error("no free initial station left for player {0}")]
    NoFreeStation(PlayerId),

    #[error("turn policy did not leave the initial round after placing {placed} players")]
    TurnOrderStalled { placed: usize },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

impl ControllerError {
    /// True for commands issued in a status or situation that does not allow
    /// them, such as `start` before the previous move log was cleared.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

impl GameError for ControllerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidState { .. } | Self::TurnOrderStalled { .. } => {
                ErrorSeverity::Internal
            }
            Self::SecurityViolation { .. } => ErrorSeverity::Fatal,
            Self::IllegalMove(_)
            | Self::UnknownPlayer(_)
            | Self::NoPlayers
            | Self::NoFreeStation(_) => ErrorSeverity::Validation,
            Self::NothingToUndo | Self::NothingToRedo => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidState { .. } => "CONTROLLER_INVALID_STATE",
            Self::SecurityViolation { .. } => "CONTROLLER_SECURITY_VIOLATION",
            Self::IllegalMove(inner) => inner.error_code(),
            Self::UnknownPlayer(_) => "CONTROLLER_UNKNOWN_PLAYER",
            Self::NoPlayers => "CONTROLLER_NO_PLAYERS",
            Self::NoFreeStation(_) => "CONTROLLER_NO_FREE_STATION",
            Self::TurnOrderStalled { .. } => "CONTROLLER_TURN_ORDER_STALLED",
            Self::NothingToUndo => "CONTROLLER_NOTHING_TO_UNDO",
            Self::NothingToRedo => "CONTROLLER_NOTHING_TO_REDO",
        }
    }
}
