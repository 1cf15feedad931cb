use std::collections::BTreeSet;

use crate::graph::StationId;

/// Tunable numbers of the standard rules.
///
/// `Default` yields the board game's own numbers. Every field may be omitted in
/// a configuration file and keeps its default. A ticket table that is given
/// replaces the default allowance as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Last round Mr. X has to survive. He wins once the round passes it.
    pub last_round: u32,

    /// Mr. X move numbers on which his station is revealed.
    pub uncover_moves: BTreeSet<u32>,

    pub detective_tickets: TicketAllowance,

    pub mr_x_tickets: TicketAllowance,

    /// Black tickets Mr. X receives for each detective in the game.
    pub black_tickets_per_detective: u32,

    /// Double move cards Mr. X starts with.
    pub double_moves: u32,

    /// Stations players may start on. Empty means any station of the board.
    pub initial_stations: BTreeSet<StationId>,

    /// Seed for the initial station draw.
    pub seed: u64,
}

impl GameConfig {
    pub const DEFAULT_LAST_ROUND: u32 = 24;
    pub const DEFAULT_UNCOVER_MOVES: [u32; 5] = [3, 8, 13, 18, 24];
    pub const DEFAULT_DOUBLE_MOVES: u32 = 2;
    pub const DEFAULT_BLACK_TICKETS_PER_DETECTIVE: u32 = 1;

    pub fn new() -> Self {
        Self {
            last_round: Self::DEFAULT_LAST_ROUND,
            uncover_moves: Self::DEFAULT_UNCOVER_MOVES.into_iter().collect(),
            detective_tickets: TicketAllowance::DETECTIVE,
            mr_x_tickets: TicketAllowance::MR_X,
            black_tickets_per_detective: Self::DEFAULT_BLACK_TICKETS_PER_DETECTIVE,
            double_moves: Self::DEFAULT_DOUBLE_MOVES,
            initial_stations: BTreeSet::new(),
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_initial_stations(mut self, stations: impl IntoIterator<Item = StationId>) -> Self {
        self.initial_stations = stations.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Regular tickets handed out at the start of a game.
///
/// Fields left out of a configuration file count as zero tickets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TicketAllowance {
    pub taxi: u32,
    pub bus: u32,
    pub underground: u32,
}

impl TicketAllowance {
    pub const DETECTIVE: Self = Self::new(10, 8, 4);
    pub const MR_X: Self = Self::new(4, 3, 3);

    pub const fn new(taxi: u32, bus: u32, underground: u32) -> Self {
        Self {
            taxi,
            bus,
            underground,
        }
    }
}
