use std::fmt;

use crate::graph::StationId;

use super::{Game, Item, PlayerId, TicketKind};

/// One entry of the move log.
///
/// Move numbers count per player: the initial placement is number 0 and every
/// step afterwards takes the next number. A double move is a compound entry
/// whose legs carry their own numbers and tickets; the compound itself reports
/// the first leg's number, the last leg's station and [`Item::DoubleMove`].
///
/// Moves are built by [`MoveProducer`] and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    player: PlayerId,
    station: StationId,
    item: Option<Item>,
    number: u32,
    round: u32,
    legs: Vec<Move>,
}

impl Move {
    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn station(&self) -> StationId {
        self.station
    }

    /// Item spent, `None` for an initial placement.
    pub fn item(&self) -> Option<Item> {
        self.item
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn legs(&self) -> &[Move] {
        &self.legs
    }

    pub fn is_initial(&self) -> bool {
        self.item.is_none() && self.legs.is_empty()
    }

    pub fn is_double(&self) -> bool {
        !self.legs.is_empty()
    }

    /// Number of the last step this move covers.
    pub fn last_number(&self) -> u32 {
        self.legs.last().map_or(self.number, |leg| leg.number)
    }

    /// Tickets spent, in travel order.
    pub fn tickets(&self) -> Vec<TicketKind> {
        if self.is_double() {
            self.legs
                .iter()
                .filter_map(|leg| leg.item.and_then(Item::as_ticket))
                .collect()
        } else {
            self.item.and_then(Item::as_ticket).into_iter().collect()
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.item, self.is_double()) {
            (None, _) => write!(f, "{} starts at {}", self.player, self.station),
            (Some(_), true) => {
                write!(f, "{} double move", self.player)?;
                for leg in &self.legs {
                    write!(f, " / {}", leg)?;
                }
                Ok(())
            }
            (Some(item), false) => write!(
                f,
                "{} #{} to {} by {}",
                self.player, self.number, self.station, item
            ),
        }
    }
}

/// Creates correctly numbered moves for the current state of a game.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveProducer;

impl MoveProducer {
    pub fn initial(game: &Game, player: PlayerId, station: StationId) -> Move {
        Move {
            player,
            station,
            item: None,
            number: 0,
            round: game.current_round(),
            legs: Vec::new(),
        }
    }

    pub fn single(game: &Game, player: PlayerId, station: StationId, ticket: TicketKind) -> Move {
        Move {
            player,
            station,
            item: Some(Item::Ticket(ticket)),
            number: game.next_move_number(player),
            round: game.current_round(),
            legs: Vec::new(),
        }
    }

    /// Builds a double move from two `(station, ticket)` steps.
    pub fn double(game: &Game, player: PlayerId, steps: [(StationId, TicketKind); 2]) -> Move {
        let first = game.next_move_number(player);
        let round = game.current_round();
        let legs: Vec<Move> = steps
            .iter()
            .zip(first..)
            .map(|(&(station, ticket), number)| Move {
                player,
                station,
                item: Some(Item::Ticket(ticket)),
                number,
                round,
                legs: Vec::new(),
            })
            .collect();

        Move {
            player,
            station: steps[1].0,
            item: Some(Item::DoubleMove),
            number: first,
            round,
            legs,
        }
    }
}
