use std::collections::BTreeSet;

use crate::graph::StationId;

use super::{Game, Item, ItemSet, Move, PlayerId};

/// A move log entry as a detective sees it.
///
/// `station` is `None` for Mr. X moves that are not uncover moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleMove {
    pub player: PlayerId,
    pub station: Option<StationId>,
    pub item: Option<Item>,
    pub number: u32,
    pub round: u32,
    pub legs: Vec<VisibleMove>,
}

/// Read-only projection of a [`Game`] for the detectives' side.
///
/// Everything is visible except where Mr. X stands: his stations are only
/// reported for uncover moves.
#[derive(Clone, Copy, Debug)]
pub struct DetectiveView<'a> {
    game: &'a Game,
    uncover_moves: &'a BTreeSet<u32>,
}

impl<'a> DetectiveView<'a> {
    pub fn new(game: &'a Game, uncover_moves: &'a BTreeSet<u32>) -> Self {
        Self {
            game,
            uncover_moves,
        }
    }

    pub fn mr_x(&self) -> Option<PlayerId> {
        self.game.mr_x()
    }

    pub fn detectives(&self) -> &'a [PlayerId] {
        self.game.detectives()
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.game.current_player()
    }

    pub fn current_round(&self) -> u32 {
        self.game.current_round()
    }

    pub fn items(&self, player: PlayerId) -> Option<&'a ItemSet> {
        self.game.items(player)
    }

    pub fn moves(&self) -> Vec<VisibleMove> {
        self.game.moves().iter().map(|m| self.mask(m)).collect()
    }

    /// Where the player stands as far as detectives know.
    ///
    /// For Mr. X this is the station of his latest uncover move.
    pub fn station_of(&self, player: PlayerId) -> Option<StationId> {
        if self.game.is_mr_x(player) {
            self.last_uncovered_station()
        } else {
            self.game.station_of(player)
        }
    }

    pub fn last_uncovered_station(&self) -> Option<StationId> {
        let mr_x = self.game.mr_x()?;
        self.game
            .moves()
            .iter()
            .rev()
            .filter(|m| m.player() == mr_x)
            .flat_map(|m| {
                if m.is_double() {
                    m.legs().iter().rev().collect::<Vec<_>>()
                } else {
                    vec![m]
                }
            })
            .find(|m| self.uncover_moves.contains(&m.number()))
            .map(Move::station)
    }

    fn mask(&self, mv: &Move) -> VisibleMove {
        let hidden =
            self.game.is_mr_x(mv.player()) && !self.uncover_moves.contains(&mv.last_number());
        VisibleMove {
            player: mv.player(),
            station: (!hidden).then(|| mv.station()),
            item: mv.item(),
            number: mv.number(),
            round: mv.round(),
            legs: mv.legs().iter().map(|leg| self.mask(leg)).collect(),
        }
    }
}
