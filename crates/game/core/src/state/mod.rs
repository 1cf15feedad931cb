//! Authoritative game model.
//!
//! [`Game`] holds players, item sets, the move log and turn bookkeeping.
//! [`GameState`] owns the game and is the only way to mutate it: each mutation
//! publishes a [`GameEvent`] to the subscribers in subscription order. The
//! controller is the sole writer; everyone else reads through [`Game`] or the
//! detective-restricted [`DetectiveView`].
mod events;
mod game;
mod items;
mod moves;
mod player;
mod view;

pub use events::GameEvent;
pub use game::{Game, INITIAL_ROUND_NUMBER};
pub use items::{Item, ItemSet, TicketKind};
pub use moves::{Move, MoveProducer};
pub use player::{PlayerId, PlayerKind};
pub use view::{DetectiveView, VisibleMove};

use std::collections::BTreeMap;

use crate::observer::{SubscriptionId, Subscribers};

/// Game model plus its change subscribers.
#[derive(Debug, Default)]
pub struct GameState {
    game: Game,
    subscribers: Subscribers<GameEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn publish(&mut self, event: GameEvent) {
        self.subscribers.publish(&event);
    }

    // ===== players =====

    pub(crate) fn create_player(&mut self, kind: PlayerKind) -> PlayerId {
        self.game.allocate_player(kind)
    }

    pub(crate) fn set_mr_x(&mut self, mr_x: Option<PlayerId>) {
        let old = self.game.replace_mr_x(mr_x);
        if old != mr_x {
            self.publish(GameEvent::MrXSet { old, new: mr_x });
        }
    }

    pub(crate) fn insert_detective(&mut self, index: usize, detective: PlayerId) {
        let index = self.game.insert_detective(index, detective);
        self.publish(GameEvent::DetectiveAdded { detective, index });
    }

    pub(crate) fn remove_detective(&mut self, detective: PlayerId) -> Option<usize> {
        let index = self.game.remove_detective(detective)?;
        self.publish(GameEvent::DetectiveRemoved { detective, index });
        Some(index)
    }

    /// Moves a detective to `index`, publishing the removal and re-insertion.
    pub(crate) fn reposition_detective(&mut self, detective: PlayerId, index: usize) {
        if self.remove_detective(detective).is_some() {
            self.insert_detective(index, detective);
        }
    }

    /// Removes Mr. X, all detectives and their items.
    pub(crate) fn clear_players(&mut self) {
        self.set_mr_x(None);
        while let Some(&last) = self.game.detectives().last() {
            self.remove_detective(last);
        }
        self.game.clear_items();
    }

    // ===== items =====

    pub(crate) fn set_items(&mut self, player: PlayerId, items: ItemSet) {
        if self.game.items(player) != Some(&items) {
            self.game.replace_items(player, items);
            self.publish(GameEvent::ItemSetChanged { player });
        }
    }

    /// Makes the item sets exactly `sets`, dropping sets of players not in it.
    pub(crate) fn restore_item_sets(&mut self, sets: &BTreeMap<PlayerId, ItemSet>) {
        let stale: Vec<PlayerId> = self
            .game
            .item_sets()
            .keys()
            .filter(|player| !sets.contains_key(player))
            .copied()
            .collect();
        for player in stale {
            self.game.remove_items(player);
            self.publish(GameEvent::ItemSetChanged { player });
        }
        for (player, items) in sets {
            self.set_items(*player, items.clone());
        }
    }

    pub(crate) fn add_item(&mut self, player: PlayerId, item: Item) {
        self.game.items_mut(player).add(item);
        self.publish(GameEvent::ItemAdded { player, item });
    }

    pub(crate) fn remove_item(&mut self, player: PlayerId, item: Item) -> bool {
        let removed = self.game.items_mut(player).remove(item);
        if removed {
            self.publish(GameEvent::ItemRemoved { player, item });
        }
        removed
    }

    // ===== move log =====

    pub(crate) fn push_move(&mut self, mv: Move) {
        self.game.push_move(mv.clone());
        self.publish(GameEvent::MoveDone(mv));
    }

    pub(crate) fn pop_move(&mut self) -> Option<Move> {
        let mv = self.game.pop_move()?;
        self.publish(GameEvent::MoveUndone(mv.clone()));
        Some(mv)
    }

    pub(crate) fn clear_moves(&mut self) {
        if !self.game.moves().is_empty() {
            self.game.clear_moves();
            self.publish(GameEvent::MovesCleared);
        }
    }

    // ===== turn =====

    pub(crate) fn set_current_player(&mut self, player: Option<PlayerId>) {
        let old = self.game.set_current_player(player);
        if old != player {
            self.publish(GameEvent::CurrentPlayerChanged { old, new: player });
        }
    }

    pub(crate) fn set_current_round(&mut self, round: u32) {
        let old = self.game.set_current_round(round);
        if old != round {
            self.publish(GameEvent::CurrentRoundChanged { old, new: round });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::graph::StationId;

    fn recording(state: &mut GameState) -> Rc<RefCell<Vec<GameEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        state.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn player_changes_are_published_in_order() {
        let mut state = GameState::new();
        let events = recording(&mut state);

        let mr_x = state.create_player(PlayerKind::MrX);
        state.set_mr_x(Some(mr_x));
        let detective = state.create_player(PlayerKind::Detective);
        state.insert_detective(5, detective);
        state.clear_players();

        assert_eq!(
            *events.borrow(),
            vec![
                GameEvent::MrXSet { old: None, new: Some(mr_x) },
                GameEvent::DetectiveAdded { detective, index: 0 },
                GameEvent::MrXSet { old: Some(mr_x), new: None },
                GameEvent::DetectiveRemoved { detective, index: 0 },
            ]
        );
        assert!(!state.game().has_players());
    }

    #[test]
    fn unchanged_turn_values_publish_nothing() {
        let mut state = GameState::new();
        let events = recording(&mut state);

        state.set_current_round(0);
        state.set_current_player(None);
        state.clear_moves();

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn move_numbers_continue_after_double_moves() {
        let mut state = GameState::new();
        let mr_x = state.create_player(PlayerKind::MrX);
        state.set_mr_x(Some(mr_x));

        let initial = MoveProducer::initial(state.game(), mr_x, StationId(1));
        state.push_move(initial);
        let double = MoveProducer::double(
            state.game(),
            mr_x,
            [(StationId(2), TicketKind::Taxi), (StationId(3), TicketKind::Black)],
        );
        assert_eq!(double.number(), 1);
        assert_eq!(double.legs()[1].number(), 2);
        assert_eq!(double.station(), StationId(3));
        state.push_move(double);

        assert_eq!(state.game().next_move_number(mr_x), 3);
        assert_eq!(state.game().station_of(mr_x), Some(StationId(3)));
    }
}
