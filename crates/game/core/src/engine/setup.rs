//! Commands accepted between games: seating and starting.
use crate::rules::GameWin;
use crate::state::{INITIAL_ROUND_NUMBER, MoveProducer, PlayerId, PlayerKind};

use super::{ControllerError, Edit, GameController, GameStatus, Operation, Shift, TurnSnapshot};

impl GameController {
    /// Clears the move log and turn bookkeeping. Not undoable.
    pub(super) fn reset_game(&mut self) {
        self.state.clear_moves();
        self.state.set_current_player(None);
        self.state.set_current_round(INITIAL_ROUND_NUMBER);
        self.edits.discard();
        tracing::info!("new game prepared");
    }

    /// Removes every player. Not undoable.
    pub(super) fn remove_all_players(&mut self) {
        self.state.clear_players();
        self.state.set_current_player(None);
        self.edits.discard();
        tracing::info!("players cleared");
    }

    pub(super) fn add_mr_x(&mut self) -> PlayerId {
        let mr_x = self.state.create_player(PlayerKind::MrX);
        let old = self.game().mr_x();
        self.state.set_mr_x(Some(mr_x));
        self.edits.push(Edit::NewMrX { old, new: mr_x });
        tracing::debug!(%mr_x, ?old, "mr. x seated");
        mr_x
    }

    pub(super) fn add_detective(&mut self) -> PlayerId {
        let detective = self.state.create_player(PlayerKind::Detective);
        let index = self.game().detectives().len();
        self.state.insert_detective(index, detective);
        self.edits.push(Edit::NewDetective { detective, index });
        tracing::debug!(%detective, index, "detective seated");
        detective
    }

    pub(super) fn drop_detective(&mut self, detective: PlayerId) -> Result<(), ControllerError> {
        let index = self
            .state
            .remove_detective(detective)
            .ok_or(ControllerError::UnknownPlayer(detective))?;
        self.edits.push(Edit::RemoveDetective { detective, index });
        tracing::debug!(%detective, index, "detective removed");
        Ok(())
    }

    /// Swaps a detective with its neighbour. Past either end this is a no-op.
    pub(super) fn shift_detective(
        &mut self,
        detective: PlayerId,
        shift: Shift,
    ) -> Result<(), ControllerError> {
        let old_index = self
            .game()
            .detective_index(detective)
            .ok_or(ControllerError::UnknownPlayer(detective))?;
        let len = self.game().detectives().len();

        let (new_index, edit) = match shift {
            Shift::Up if old_index > 0 => (
                old_index - 1,
                Edit::ShiftUpDetective {
                    detective,
                    old_index,
                },
            ),
            Shift::Down if old_index + 1 < len => (
                old_index + 1,
                Edit::ShiftDownDetective {
                    detective,
                    old_index,
                },
            ),
            _ => return Ok(()),
        };

        self.state.reposition_detective(detective, new_index);
        self.edits.push(edit);
        tracing::debug!(%detective, old_index, new_index, "detective shifted");
        Ok(())
    }

    /// Places every player for the initial round, then enters the game unless
    /// the placement already decided it.
    pub(super) fn begin(&mut self, sender: GameStatus) -> Result<(), ControllerError> {
        if !self.game().moves().is_empty() {
            return Err(ControllerError::InvalidState {
                operation: Operation::Start,
                status: sender,
            });
        }
        if !self.game().has_players() {
            return Err(ControllerError::NoPlayers);
        }

        let before = TurnSnapshot::capture(&self.state);
        if let Err(err) = self.place_players() {
            tracing::warn!(%err, "initial placement failed");
            self.state.clear_moves();
            before.restore(&mut self.state);
            return Err(err);
        }
        self.edits.discard();

        let win = self.rules.win().is_game_won(self.state.game(), &self.graph);
        if win.is_won() {
            tracing::info!(%win, "game decided during placement");
            return self.set_state(sender, GameStatus::NotInGame, win);
        }
        self.set_state(sender, GameStatus::InGame, GameWin::None)
    }

    fn place_players(&mut self) -> Result<(), ControllerError> {
        self.state.set_current_round(INITIAL_ROUND_NUMBER);
        self.state.set_current_player(None);

        let limit = self.game().players().len();
        let mut placed = 0;
        while self.rules.turn().next_round_number(self.state.game(), &self.graph)
            == INITIAL_ROUND_NUMBER
        {
            if placed == limit {
                return Err(ControllerError::TurnOrderStalled { placed });
            }
            let player = self
                .rules
                .turn()
                .next_player(self.state.game(), &self.graph)
                .ok_or(ControllerError::NoPlayers)?;
            self.state.set_current_player(Some(player));

            let items = self.rules.init().create_item_set(self.state.game(), player);
            self.state.set_items(player, items);

            let station = self
                .rules
                .init()
                .suggest_initial_station(
                    self.state.game(),
                    &self.graph,
                    &self.initial_positions,
                    player,
                )
                .ok_or(ControllerError::NoFreeStation(player))?;
            let initial = MoveProducer::initial(self.state.game(), player, station);
            tracing::debug!(%initial, "placed");
            self.state.push_move(initial);
            placed += 1;
        }

        let game = self.state.game();
        let round = self.rules.turn().next_round_number(game, &self.graph);
        let next = self.rules.turn().next_player(game, &self.graph);
        self.state.set_current_round(round);
        self.state.set_current_player(next);
        tracing::info!(placed, round, "players placed");
        Ok(())
    }
}
