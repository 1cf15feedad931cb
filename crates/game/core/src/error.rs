//! Error classification shared by every game-core error.
//!
//! Each component keeps its own `thiserror` enum next to the code that raises
//! it: [`crate::ControllerError`], [`crate::IllegalMove`], [`crate::GraphError`]
//! and [`crate::PrepareError`]. They all implement [`GameError`] so front ends
//! can decide how loudly to report a failure without matching every variant.

/// How bad a failed command was.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ErrorSeverity {
    /// Nothing happened; undo with an empty history, a rejected preparation step.
    Recoverable,

    /// The input was wrong: an illegal move, an unknown detective, a corrupt board.
    Validation,

    /// The caller ignored the controller status, e.g. `move` outside a game.
    Internal,

    /// The state machine or the environment is broken.
    Fatal,
}

impl ErrorSeverity {
    /// True when the controller state is guaranteed untouched and the user can
    /// simply try something else.
    pub const fn is_user_facing(self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common interface of game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, for logs and assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_ordered_by_gravity() {
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Validation);
        assert!(ErrorSeverity::Internal < ErrorSeverity::Fatal);
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
    }

    #[test]
    fn only_input_problems_are_user_facing() {
        assert!(ErrorSeverity::Validation.is_user_facing());
        assert!(!ErrorSeverity::Internal.is_user_facing());
        assert!(!ErrorSeverity::Fatal.is_user_facing());
    }
}
