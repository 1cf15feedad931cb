use std::collections::{BTreeMap, BTreeSet};

use crate::graph::StationId;

use super::{ItemSet, Move, PlayerId, PlayerKind};

/// Round number in effect while players are being placed.
pub const INITIAL_ROUND_NUMBER: u32 = 0;

/// The mutable root of the game model.
///
/// Read access is public; every mutation goes through [`crate::GameState`] so
/// that subscribers see each change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Game {
    mr_x: Option<PlayerId>,
    detectives: Vec<PlayerId>,
    kinds: BTreeMap<PlayerId, PlayerKind>,
    items: BTreeMap<PlayerId, ItemSet>,
    moves: Vec<Move>,
    current_player: Option<PlayerId>,
    current_round: u32,
    next_player_id: u32,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mr_x(&self) -> Option<PlayerId> {
        self.mr_x
    }

    pub fn detectives(&self) -> &[PlayerId] {
        &self.detectives
    }

    /// All players in seating order: Mr. X first, then the detectives.
    pub fn players(&self) -> Vec<PlayerId> {
        self.mr_x
            .into_iter()
            .chain(self.detectives.iter().copied())
            .collect()
    }

    pub fn has_players(&self) -> bool {
        self.mr_x.is_some() || !self.detectives.is_empty()
    }

    pub fn contains_player(&self, player: PlayerId) -> bool {
        self.mr_x == Some(player) || self.detectives.contains(&player)
    }

    /// Kind of any player ever created in this game, including removed ones.
    pub fn kind_of(&self, player: PlayerId) -> Option<PlayerKind> {
        self.kinds.get(&player).copied()
    }

    pub fn is_mr_x(&self, player: PlayerId) -> bool {
        self.mr_x == Some(player)
    }

    pub fn detective_index(&self, detective: PlayerId) -> Option<usize> {
        self.detectives.iter().position(|d| *d == detective)
    }

    /// By-value configuration of the players: kinds in seating order.
    pub fn lineup(&self) -> Vec<PlayerKind> {
        self.players()
            .into_iter()
            .filter_map(|player| self.kind_of(player))
            .collect()
    }

    pub fn items(&self, player: PlayerId) -> Option<&ItemSet> {
        self.items.get(&player)
    }

    pub fn item_sets(&self) -> &BTreeMap<PlayerId, ItemSet> {
        &self.items
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self, player: PlayerId) -> Option<&Move> {
        self.moves.iter().rev().find(|m| m.player() == player)
    }

    /// Station the player currently stands on, `None` before placement.
    pub fn station_of(&self, player: PlayerId) -> Option<StationId> {
        self.last_move(player).map(Move::station)
    }

    /// Number the player's next move must carry.
    pub fn next_move_number(&self, player: PlayerId) -> u32 {
        self.last_move(player).map_or(0, |m| m.last_number() + 1)
    }

    /// Stations currently occupied by detectives other than `except`.
    pub fn detective_stations(&self, except: Option<PlayerId>) -> BTreeSet<StationId> {
        self.detectives
            .iter()
            .filter(|d| Some(**d) != except)
            .filter_map(|d| self.station_of(*d))
            .collect()
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_player
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    // ===== mutation, reserved for GameState =====

    pub(crate) fn allocate_player(&mut self, kind: PlayerKind) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        self.kinds.insert(id, kind);
        id
    }

    pub(crate) fn replace_mr_x(&mut self, mr_x: Option<PlayerId>) -> Option<PlayerId> {
        std::mem::replace(&mut self.mr_x, mr_x)
    }

    pub(crate) fn insert_detective(&mut self, index: usize, detective: PlayerId) -> usize {
        let index = index.min(self.detectives.len());
        self.detectives.insert(index, detective);
        index
    }

    pub(crate) fn remove_detective(&mut self, detective: PlayerId) -> Option<usize> {
        let index = self.detective_index(detective)?;
        self.detectives.remove(index);
        Some(index)
    }

    pub(crate) fn items_mut(&mut self, player: PlayerId) -> &mut ItemSet {
        self.items.entry(player).or_default()
    }

    pub(crate) fn replace_items(&mut self, player: PlayerId, items: ItemSet) -> Option<ItemSet> {
        self.items.insert(player, items)
    }

    pub(crate) fn remove_items(&mut self, player: PlayerId) -> Option<ItemSet> {
        self.items.remove(&player)
    }

    pub(crate) fn clear_items(&mut self) {
        self.items.clear();
    }

    pub(crate) fn push_move(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub(crate) fn pop_move(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub(crate) fn clear_moves(&mut self) {
        self.moves.clear();
    }

    pub(crate) fn set_current_player(&mut self, player: Option<PlayerId>) -> Option<PlayerId> {
        std::mem::replace(&mut self.current_player, player)
    }

    pub(crate) fn set_current_round(&mut self, round: u32) -> u32 {
        std::mem::replace(&mut self.current_round, round)
    }
}
