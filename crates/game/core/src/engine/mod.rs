//! Game lifecycle state machine.
//!
//! The [`GameController`] is the only writer of the [`GameState`]. Every
//! command is checked against the transition table for the active
//! [`GameStatus`] before it runs, consults the [`Rules`] and records an
//! [`Edit`] so it can be undone. Status observers hear about a change only
//! after it has been committed.
mod edits;
mod errors;
mod play;
mod setup;
mod transition;

pub use edits::{Edit, EditLog, TurnSnapshot};
pub use errors::ControllerError;
pub use transition::{GameStatus, Operation};

use std::collections::BTreeSet;

use crate::graph::{GameGraph, StationId};
use crate::observer::{SubscriptionId, Subscribers};
use crate::prepare::PreparationContext;
use crate::rules::{GameWin, Rules};
use crate::state::{DetectiveView, Game, GameEvent, GameState, Move, PlayerId};

/// Published to status observers whenever status or win changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusChange {
    pub status: GameStatus,
    pub win: GameWin,
}

/// Who is asking for the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requester {
    /// Board, menus, Mr. X's side: sees everything.
    FrontEnd,
    MrX,
    /// Detectives and their helpers: Mr. X stays hidden.
    Detective,
}

/// Game state as handed out to a [`Requester`].
#[derive(Clone, Copy, Debug)]
pub enum StateAccess<'a> {
    Full(&'a Game),
    Detective(DetectiveView<'a>),
}

/// Orchestrates a game using the model, the board and the rules.
#[derive(Debug)]
pub struct GameController {
    state: GameState,
    graph: GameGraph,
    rules: Rules,
    initial_positions: BTreeSet<StationId>,
    edits: EditLog,
    status: GameStatus,
    win: GameWin,
    observers: Subscribers<StatusChange>,
}

impl GameController {
    pub fn new(graph: GameGraph, rules: Rules, initial_positions: BTreeSet<StationId>) -> Self {
        Self {
            state: GameState::new(),
            graph,
            rules,
            initial_positions,
            edits: EditLog::new(),
            status: GameStatus::NotInGame,
            win: GameWin::None,
            observers: Subscribers::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn win(&self) -> GameWin {
        self.win
    }

    pub fn game(&self) -> &Game {
        self.state.game()
    }

    pub fn graph(&self) -> &GameGraph {
        &self.graph
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn initial_positions(&self) -> &BTreeSet<StationId> {
        &self.initial_positions
    }

    pub fn can_undo(&self) -> bool {
        self.edits.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.edits.can_redo()
    }

    /// Game state restricted according to who is asking.
    pub fn state_for(&self, requester: Requester) -> StateAccess<'_> {
        match requester {
            Requester::FrontEnd | Requester::MrX => StateAccess::Full(self.state.game()),
            Requester::Detective => {
                StateAccess::Detective(self.rules.access().detective_view(self.state.game()))
            }
        }
    }

    /// What a [`crate::MovePreparer`] needs to check selections.
    pub fn preparation_context(&self) -> PreparationContext<'_> {
        PreparationContext {
            game: self.state.game(),
            graph: &self.graph,
            moves: self.rules.moves(),
        }
    }

    /// Registers a status observer. Observers run in subscription order.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StatusChange) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Registers a subscriber for changes of the game model.
    pub fn subscribe_game_events<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.state.subscribe(subscriber)
    }

    pub fn unsubscribe_game_events(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    // ===== commands =====

    pub fn new_game(&mut self) -> Result<(), ControllerError> {
        self.enter(Operation::NewGame)?;
        self.reset_game();
        Ok(())
    }

    pub fn clear_players(&mut self) -> Result<(), ControllerError> {
        self.enter(Operation::ClearPlayers)?;
        self.remove_all_players();
        Ok(())
    }

    pub fn new_mr_x(&mut self) -> Result<PlayerId, ControllerError> {
        self.enter(Operation::NewMrX)?;
        Ok(self.add_mr_x())
    }

    pub fn new_detective(&mut self) -> Result<PlayerId, ControllerError> {
        self.enter(Operation::NewDetective)?;
        Ok(self.add_detective())
    }

    pub fn remove_detective(&mut self, detective: PlayerId) -> Result<(), ControllerError> {
        self.enter(Operation::RemoveDetective)?;
        self.drop_detective(detective)
    }

    pub fn shift_up_detective(&mut self, detective: PlayerId) -> Result<(), ControllerError> {
        self.enter(Operation::ShiftUpDetective)?;
        self.shift_detective(detective, Shift::Up)
    }

    pub fn shift_down_detective(&mut self, detective: PlayerId) -> Result<(), ControllerError> {
        self.enter(Operation::ShiftDownDetective)?;
        self.shift_detective(detective, Shift::Down)
    }

    /// Replaces the rule set. Only between games.
    pub fn set_rules(&mut self, rules: Rules) -> Result<(), ControllerError> {
        self.enter(Operation::SetRules)?;
        self.rules = rules;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), ControllerError> {
        let sender = self.enter(Operation::Start)?;
        self.begin(sender)
    }

    pub fn abort(&mut self) -> Result<(), ControllerError> {
        let sender = self.enter(Operation::Abort)?;
        tracing::info!("game aborted in round {}", self.game().current_round());
        self.set_state(sender, GameStatus::NotInGame, GameWin::None)
    }

    /// Applies a move of the current player.
    ///
    /// Illegal moves are rejected with [`ControllerError::IllegalMove`] and
    /// leave the game untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), ControllerError> {
        let sender = self.enter(Operation::Move)?;
        self.play(sender, mv)
    }

    pub fn undo(&mut self) -> Result<(), ControllerError> {
        self.enter(Operation::Undo)?;
        let edit = self
            .edits
            .undo(&mut self.state)
            .ok_or(ControllerError::NothingToUndo)?;
        tracing::debug!(?edit, "undone");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), ControllerError> {
        self.enter(Operation::Redo)?;
        let edit = self
            .edits
            .redo(&mut self.state)
            .ok_or(ControllerError::NothingToRedo)?;
        tracing::debug!(?edit, "redone");
        Ok(())
    }

    // ===== state machine =====

    /// Checks the transition table and returns the active status, which the
    /// command then uses as its authority for [`Self::set_state`].
    fn enter(&self, operation: Operation) -> Result<GameStatus, ControllerError> {
        if transition::permits(self.status, operation) {
            tracing::debug!(%operation, status = %self.status, "command");
            Ok(self.status)
        } else {
            Err(ControllerError::InvalidState {
                operation,
                status: self.status,
            })
        }
    }

    /// Changes status and win. Only the active status may do so.
    pub(crate) fn set_state(
        &mut self,
        sender: GameStatus,
        status: GameStatus,
        win: GameWin,
    ) -> Result<(), ControllerError> {
        if sender != self.status {
            return Err(ControllerError::SecurityViolation {
                sender,
                active: self.status,
            });
        }

        let changed = status != self.status || win != self.win;
        if status != self.status {
            tracing::info!(from = %self.status, to = %status, %win, "status changed");
            self.edits.discard();
            self.status = status;
        }
        self.win = win;

        if changed {
            self.observers.publish(&StatusChange { status, win });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shift {
    Up,
    Down,
}
