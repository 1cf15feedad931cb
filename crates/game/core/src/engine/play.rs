//! Commands accepted during a game.
use crate::rules::{GameWin, ItemEffect};
use crate::state::Move;

use super::{ControllerError, Edit, GameController, GameStatus, TurnSnapshot};

impl GameController {
    /// Validates and applies `mv`, hands the turn on and checks for a winner.
    pub(super) fn play(&mut self, sender: GameStatus, mv: Move) -> Result<(), ControllerError> {
        if let Err(err) = self.rules.moves().validate(self.state.game(), &self.graph, &mv) {
            tracing::warn!(%mv, %err, "illegal move rejected");
            return Err(err.into());
        }

        let before = TurnSnapshot::capture(&self.state);
        let effects = self.rules.moves().effects(self.state.game(), &mv);
        for effect in effects {
            self.apply_effect(effect);
        }
        self.state.push_move(mv.clone());

        let game = self.state.game();
        let round = self
            .rules
            .turn()
            .next_round_number(game, &self.graph)
            .max(game.current_round());
        let next = self.rules.turn().next_player(game, &self.graph);
        self.state.set_current_round(round);
        self.state.set_current_player(next);

        let after = TurnSnapshot::capture(&self.state);
        tracing::info!(%mv, round, "move played");
        self.edits.push(Edit::Move { mv, before, after });

        let win = self.rules.win().is_game_won(self.state.game(), &self.graph);
        if win.is_won() {
            return self.set_state(sender, GameStatus::NotInGame, win);
        }
        debug_assert_eq!(self.win, GameWin::None);
        Ok(())
    }

    fn apply_effect(&mut self, effect: ItemEffect) {
        match effect {
            ItemEffect::Spend { player, item } => {
                if !self.state.remove_item(player, item) {
                    tracing::error!(%player, %item, "validated move spent a missing item");
                }
            }
            ItemEffect::Grant { player, item } => self.state.add_item(player, item),
        }
    }
}
