use super::{Item, Move, PlayerId};

/// Change notifications published by [`crate::GameState`].
///
/// Events are published after the change has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CurrentRoundChanged { old: u32, new: u32 },
    CurrentPlayerChanged {
        old: Option<PlayerId>,
        new: Option<PlayerId>,
    },
    MrXSet {
        old: Option<PlayerId>,
        new: Option<PlayerId>,
    },
    DetectiveAdded { detective: PlayerId, index: usize },
    DetectiveRemoved { detective: PlayerId, index: usize },
    ItemSetChanged { player: PlayerId },
    ItemAdded { player: PlayerId, item: Item },
    ItemRemoved { player: PlayerId, item: Item },
    MoveDone(Move),
    MoveUndone(Move),
    MovesCleared,
}
