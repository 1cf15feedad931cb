//! Which operations each controller status accepts.

/// Lifecycle status of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    NotInGame,
    InGame,
}

/// Controller commands, as keys of the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    NewGame,
    ClearPlayers,
    NewMrX,
    NewDetective,
    RemoveDetective,
    ShiftUpDetective,
    ShiftDownDetective,
    SetRules,
    Start,
    Abort,
    Move,
    Undo,
    Redo,
}

/// Transition table keyed by (status, operation).
pub(super) fn permits(status: GameStatus, operation: Operation) -> bool {
    use GameStatus::{InGame, NotInGame};
    use Operation::*;

    match (status, operation) {
        (
            NotInGame,
            NewGame | ClearPlayers | NewMrX | NewDetective | RemoveDetective | ShiftUpDetective
            | ShiftDownDetective | SetRules | Start,
        ) => true,
        (InGame, Abort | Move) => true,
        (_, Undo | Redo) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn each_operation_except_history_belongs_to_one_status() {
        for operation in Operation::iter() {
            let accepted = [GameStatus::NotInGame, GameStatus::InGame]
                .into_iter()
                .filter(|status| permits(*status, operation))
                .count();
            let expected = match operation {
                Operation::Undo | Operation::Redo => 2,
                _ => 1,
            };
            assert_eq!(accepted, expected, "{operation}");
        }
    }

    #[test]
    fn moves_only_in_game() {
        assert!(permits(GameStatus::InGame, Operation::Move));
        assert!(!permits(GameStatus::NotInGame, Operation::Move));
        assert!(!permits(GameStatus::InGame, Operation::Start));
    }
}
