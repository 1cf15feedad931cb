//! The board game's own rules.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::graph::{GameGraph, StationId};
use crate::state::{Game, Item, ItemSet, PlayerId, PlayerKind, TicketKind};

use super::{
    GameInitPolicy, GameStateAccessPolicy, GameWin, GameWinPolicy, MovePolicy, PcgRng,
    StandardMovePolicy, TurnPolicy, compute_seed,
};

/// Hands out the configured tickets and draws free starting stations.
#[derive(Clone, Debug)]
pub struct StandardInitPolicy {
    config: Arc<GameConfig>,
}

impl StandardInitPolicy {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self { config }
    }
}

impl GameInitPolicy for StandardInitPolicy {
    fn create_item_set(&self, game: &Game, player: PlayerId) -> ItemSet {
        match game.kind_of(player) {
            Some(PlayerKind::Detective) => {
                let allowance = self.config.detective_tickets;
                ItemSet::new()
                    .with(TicketKind::Taxi, allowance.taxi)
                    .with(TicketKind::Bus, allowance.bus)
                    .with(TicketKind::Underground, allowance.underground)
            }
            Some(PlayerKind::MrX) => {
                let allowance = self.config.mr_x_tickets;
                let detectives = u32::try_from(game.detectives().len()).unwrap_or(u32::MAX);
                let black = self
                    .config
                    .black_tickets_per_detective
                    .saturating_mul(detectives);
                ItemSet::new()
                    .with(TicketKind::Taxi, allowance.taxi)
                    .with(TicketKind::Bus, allowance.bus)
                    .with(TicketKind::Underground, allowance.underground)
                    .with(TicketKind::Black, black)
                    .with(Item::DoubleMove, self.config.double_moves)
            }
            None => ItemSet::new(),
        }
    }

    fn suggest_initial_station(
        &self,
        game: &Game,
        graph: &GameGraph,
        allowed: &BTreeSet<StationId>,
        player: PlayerId,
    ) -> Option<StationId> {
        let taken: BTreeSet<StationId> = game
            .players()
            .into_iter()
            .filter(|p| *p != player)
            .filter_map(|p| game.station_of(p))
            .collect();

        let free: Vec<StationId> = if allowed.is_empty() {
            graph.station_ids().filter(|s| !taken.contains(s)).collect()
        } else {
            allowed
                .iter()
                .copied()
                .filter(|s| graph.contains(*s) && !taken.contains(s))
                .collect()
        };
        if free.is_empty() {
            return None;
        }

        let seed = compute_seed(self.config.seed, game.moves().len() as u64, player.0);
        Some(free[PcgRng::pick(seed, free.len())])
    }
}

/// Mr. X first, then the detectives in list order.
///
/// Once everyone is on the board, detectives without any possible move are
/// skipped. The round advances whenever the order wraps around.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTurnPolicy {
    moves: StandardMovePolicy,
}

impl StandardTurnPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_index(game: &Game, order: &[PlayerId]) -> usize {
        game.current_player()
            .and_then(|current| order.iter().position(|p| *p == current))
            .map_or(0, |index| index + 1)
    }

    fn next_index(&self, game: &Game, graph: &GameGraph, order: &[PlayerId]) -> Option<usize> {
        if order.is_empty() {
            return None;
        }
        let start = Self::start_index(game, order);
        let placed = order.iter().all(|p| game.station_of(*p).is_some());
        let stuck = |player: PlayerId| {
            placed
                && !game.is_mr_x(player)
                && self.moves.possible_moves(game, graph, player).is_empty()
        };

        (0..order.len())
            .map(|offset| (start + offset) % order.len())
            .find(|index| !stuck(order[*index]))
            .or(Some(start % order.len()))
    }
}

impl TurnPolicy for StandardTurnPolicy {
    fn next_player(&self, game: &Game, graph: &GameGraph) -> Option<PlayerId> {
        let order = game.players();
        self.next_index(game, graph, &order).map(|index| order[index])
    }

    fn next_round_number(&self, game: &Game, graph: &GameGraph) -> u32 {
        let order = game.players();
        let current = game
            .current_player()
            .and_then(|current| order.iter().position(|p| *p == current));

        match (current, self.next_index(game, graph, &order)) {
            (Some(current), Some(next)) if next > current => game.current_round(),
            (Some(_), Some(_)) => game.current_round() + 1,
            _ => game.current_round(),
        }
    }
}

/// Win conditions of the board game.
///
/// Detectives win by standing on Mr. X's station or when Mr. X cannot move on
/// his turn. Mr. X wins once the last round is over or when no detective can
/// move any more.
#[derive(Clone, Debug)]
pub struct StandardWinPolicy {
    config: Arc<GameConfig>,
    moves: StandardMovePolicy,
}

impl StandardWinPolicy {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self {
            config,
            moves: StandardMovePolicy,
        }
    }
}

impl GameWinPolicy for StandardWinPolicy {
    fn is_game_won(&self, game: &Game, graph: &GameGraph) -> GameWin {
        let Some(mr_x) = game.mr_x() else {
            return GameWin::None;
        };
        let Some(hideout) = game.station_of(mr_x) else {
            return GameWin::None;
        };

        if game
            .detectives()
            .iter()
            .any(|d| game.station_of(*d) == Some(hideout))
        {
            return GameWin::Detectives;
        }
        if game.current_player() == Some(mr_x)
            && self.moves.possible_moves(game, graph, mr_x).is_empty()
        {
            return GameWin::Detectives;
        }
        if game.current_round() > self.config.last_round {
            return GameWin::MrX;
        }
        if game
            .detectives()
            .iter()
            .all(|d| self.moves.possible_moves(game, graph, *d).is_empty())
        {
            return GameWin::MrX;
        }
        GameWin::None
    }
}

/// Reveals Mr. X on the configured uncover moves.
#[derive(Clone, Debug)]
pub struct StandardAccessPolicy {
    uncover_moves: BTreeSet<u32>,
}

impl StandardAccessPolicy {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            uncover_moves: config.uncover_moves.clone(),
        }
    }
}

impl GameStateAccessPolicy for StandardAccessPolicy {
    fn uncover_moves(&self) -> &BTreeSet<u32> {
        &self.uncover_moves
    }
}
