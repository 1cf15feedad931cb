//! Linear undo/redo history.
//!
//! Every undoable command pushes one [`Edit`] carrying what it needs to revert
//! and re-apply the change. Pushing after an undo drops the redo tail.

use std::collections::BTreeMap;

use crate::state::{GameState, ItemSet, Move, PlayerId};

/// Turn bookkeeping around a move: who is on, which round, who holds what.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSnapshot {
    current_player: Option<PlayerId>,
    current_round: u32,
    items: BTreeMap<PlayerId, ItemSet>,
}

impl TurnSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let game = state.game();
        Self {
            current_player: game.current_player(),
            current_round: game.current_round(),
            items: game.item_sets().clone(),
        }
    }

    pub(super) fn restore(&self, state: &mut GameState) {
        state.restore_item_sets(&self.items);
        state.set_current_round(self.current_round);
        state.set_current_player(self.current_player);
    }
}

/// One undoable change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    NewMrX {
        old: Option<PlayerId>,
        new: PlayerId,
    },
    NewDetective {
        detective: PlayerId,
        index: usize,
    },
    RemoveDetective {
        detective: PlayerId,
        index: usize,
    },
    ShiftUpDetective {
        detective: PlayerId,
        old_index: usize,
    },
    ShiftDownDetective {
        detective: PlayerId,
        old_index: usize,
    },
    Move {
        mv: Move,
        before: TurnSnapshot,
        after: TurnSnapshot,
    },
}

impl Edit {
    fn revert(&self, state: &mut GameState) {
        match self {
            Self::NewMrX { old, .. } => state.set_mr_x(*old),
            Self::NewDetective { detective, .. } => {
                state.remove_detective(*detective);
            }
            Self::RemoveDetective { detective, index } => state.insert_detective(*index, *detective),
            Self::ShiftUpDetective {
                detective,
                old_index,
            }
            | Self::ShiftDownDetective {
                detective,
                old_index,
            } => state.reposition_detective(*detective, *old_index),
            Self::Move { before, .. } => {
                state.pop_move();
                before.restore(state);
            }
        }
    }

    fn reapply(&self, state: &mut GameState) {
        match self {
            Self::NewMrX { new, .. } => state.set_mr_x(Some(*new)),
            Self::NewDetective { detective, index } => state.insert_detective(*index, *detective),
            Self::RemoveDetective { detective, .. } => {
                state.remove_detective(*detective);
            }
            Self::ShiftUpDetective {
                detective,
                old_index,
            } => state.reposition_detective(*detective, old_index.saturating_sub(1)),
            Self::ShiftDownDetective {
                detective,
                old_index,
            } => state.reposition_detective(*detective, old_index + 1),
            Self::Move { mv, after, .. } => {
                state.push_move(mv.clone());
                after.restore(state);
            }
        }
    }
}

/// History of edits with a cursor between the undo and redo halves.
#[derive(Clone, Debug, Default)]
pub struct EditLog {
    edits: Vec<Edit>,
    cursor: usize,
}

impl EditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: Edit) {
        self.edits.truncate(self.cursor);
        self.edits.push(edit);
        self.cursor = self.edits.len();
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.edits.len()
    }

    /// Reverts the latest applied edit. Returns it, or `None` if there is none.
    pub fn undo(&mut self, state: &mut GameState) -> Option<&Edit> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        let edit = &self.edits[self.cursor];
        edit.revert(state);
        Some(edit)
    }

    /// Re-applies the next undone edit. Returns it, or `None` if there is none.
    pub fn redo(&mut self, state: &mut GameState) -> Option<&Edit> {
        if !self.can_redo() {
            return None;
        }
        let edit = &self.edits[self.cursor];
        edit.reapply(state);
        self.cursor += 1;
        Some(edit)
    }

    pub fn discard(&mut self) {
        self.edits.clear();
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerKind;

    fn three_detectives(state: &mut GameState) -> Vec<PlayerId> {
        (0..3)
            .map(|index| {
                let detective = state.create_player(PlayerKind::Detective);
                state.insert_detective(index, detective);
                detective
            })
            .collect()
    }

    #[test]
    fn push_after_undo_drops_redo_tail() {
        let mut state = GameState::new();
        let mut log = EditLog::new();
        let ds = three_detectives(&mut state);

        log.push(Edit::NewDetective {
            detective: ds[2],
            index: 2,
        });
        log.undo(&mut state);
        assert!(log.can_redo());

        state.remove_detective(ds[0]);
        log.push(Edit::RemoveDetective {
            detective: ds[0],
            index: 0,
        });

        assert!(!log.can_redo());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn shift_edits_revert_and_reapply() {
        let mut state = GameState::new();
        let mut log = EditLog::new();
        let ds = three_detectives(&mut state);

        state.reposition_detective(ds[2], 1);
        log.push(Edit::ShiftUpDetective {
            detective: ds[2],
            old_index: 2,
        });
        assert_eq!(state.game().detectives(), &[ds[0], ds[2], ds[1]]);

        log.undo(&mut state);
        assert_eq!(state.game().detectives(), &[ds[0], ds[1], ds[2]]);

        log.redo(&mut state);
        assert_eq!(state.game().detectives(), &[ds[0], ds[2], ds[1]]);
    }

    #[test]
    fn undo_on_empty_log_does_nothing() {
        let mut state = GameState::new();
        let mut log = EditLog::new();

        assert!(log.undo(&mut state).is_none());
        assert!(log.redo(&mut state).is_none());
    }
}
