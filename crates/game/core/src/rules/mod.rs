//! Pluggable rule policies consulted by the controller.
//!
//! The controller knows nothing about tickets, seating order or how a game is
//! won; it asks the strategy objects bundled in [`Rules`]. Policies only read
//! the game. Effects of a move are described as [`ItemEffect`]s and applied by
//! the controller, which keeps every mutation in one place.
mod moves;
mod rng;
mod standard;

pub use moves::{IllegalMove, ItemEffect, MoveOption, StandardMovePolicy};
pub use rng::{PcgRng, compute_seed};
pub use standard::{
    StandardAccessPolicy, StandardInitPolicy, StandardTurnPolicy, StandardWinPolicy,
};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::graph::{GameGraph, StationId};
use crate::state::{DetectiveView, Game, ItemSet, Move, PlayerId};

/// Outcome of the win check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameWin {
    /// Nobody has won (yet).
    #[default]
    None,
    MrX,
    Detectives,
}

impl GameWin {
    pub const fn is_won(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Sets players up at the start of a game.
pub trait GameInitPolicy {
    fn create_item_set(&self, game: &Game, player: PlayerId) -> ItemSet;

    /// Picks a starting station from `allowed`, or `None` if none is free.
    fn suggest_initial_station(
        &self,
        game: &Game,
        graph: &GameGraph,
        allowed: &BTreeSet<StationId>,
        player: PlayerId,
    ) -> Option<StationId>;
}

/// Decides who moves next and in which round.
pub trait TurnPolicy {
    /// Player to act after the current one. `None` only when there are no players.
    fn next_player(&self, game: &Game, graph: &GameGraph) -> Option<PlayerId>;

    /// Round in which the next player acts.
    fn next_round_number(&self, game: &Game, graph: &GameGraph) -> u32;
}

/// Move legality and effects.
pub trait MovePolicy {
    /// Single steps the player could take from `from` paying with `budget`.
    fn possible_moves_from(
        &self,
        game: &Game,
        graph: &GameGraph,
        player: PlayerId,
        from: StationId,
        budget: &ItemSet,
    ) -> BTreeSet<MoveOption>;

    /// Single steps the player could take right now.
    fn possible_moves(&self, game: &Game, graph: &GameGraph, player: PlayerId) -> BTreeSet<MoveOption> {
        let (Some(from), Some(items)) = (game.station_of(player), game.items(player)) else {
            return BTreeSet::new();
        };
        self.possible_moves_from(game, graph, player, from, items)
    }

    fn validate(&self, game: &Game, graph: &GameGraph, mv: &Move) -> Result<(), IllegalMove>;

    /// Item transfers caused by a validated move.
    fn effects(&self, game: &Game, mv: &Move) -> Vec<ItemEffect>;
}

pub trait GameWinPolicy {
    fn is_game_won(&self, game: &Game, graph: &GameGraph) -> GameWin;
}

/// Controls what the detectives' side may see.
pub trait GameStateAccessPolicy {
    fn uncover_moves(&self) -> &BTreeSet<u32>;

    fn is_uncover_move(&self, number: u32) -> bool {
        self.uncover_moves().contains(&number)
    }

    fn detective_view<'a>(&'a self, game: &'a Game) -> DetectiveView<'a> {
        DetectiveView::new(game, self.uncover_moves())
    }
}

/// The complete rule set handed to the controller.
pub struct Rules {
    init: Box<dyn GameInitPolicy>,
    turn: Box<dyn TurnPolicy>,
    moves: Box<dyn MovePolicy>,
    win: Box<dyn GameWinPolicy>,
    access: Box<dyn GameStateAccessPolicy>,
}

impl Rules {
    pub fn new(
        init: Box<dyn GameInitPolicy>,
        turn: Box<dyn TurnPolicy>,
        moves: Box<dyn MovePolicy>,
        win: Box<dyn GameWinPolicy>,
        access: Box<dyn GameStateAccessPolicy>,
    ) -> Self {
        Self {
            init,
            turn,
            moves,
            win,
            access,
        }
    }

    /// The board game rules, tuned by `config`.
    pub fn standard(config: GameConfig) -> Self {
        let config = Arc::new(config);
        Self::new(
            Box::new(StandardInitPolicy::new(Arc::clone(&config))),
            Box::new(StandardTurnPolicy::new()),
            Box::new(StandardMovePolicy),
            Box::new(StandardWinPolicy::new(Arc::clone(&config))),
            Box::new(StandardAccessPolicy::new(&config)),
        )
    }

    pub fn init(&self) -> &dyn GameInitPolicy {
        self.init.as_ref()
    }

    pub fn turn(&self) -> &dyn TurnPolicy {
        self.turn.as_ref()
    }

    pub fn moves(&self) -> &dyn MovePolicy {
        self.moves.as_ref()
    }

    pub fn win(&self) -> &dyn GameWinPolicy {
        self.win.as_ref()
    }

    pub fn access(&self) -> &dyn GameStateAccessPolicy {
        self.access.as_ref()
    }

    #[must_use]
    pub fn with_init(mut self, init: impl GameInitPolicy + 'static) -> Self {
        self.init = Box::new(init);
        self
    }

    #[must_use]
    pub fn with_turn(mut self, turn: impl TurnPolicy + 'static) -> Self {
        self.turn = Box::new(turn);
        self
    }

    #[must_use]
    pub fn with_moves(mut self, moves: impl MovePolicy + 'static) -> Self {
        self.moves = Box::new(moves);
        self
    }

    #[must_use]
    pub fn with_win(mut self, win: impl GameWinPolicy + 'static) -> Self {
        self.win = Box::new(win);
        self
    }

    #[must_use]
    pub fn with_access(mut self, access: impl GameStateAccessPolicy + 'static) -> Self {
        self.access = Box::new(access);
        self
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard(GameConfig::default())
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("uncover_moves", self.access.uncover_moves())
            .finish_non_exhaustive()
    }
}
