use std::collections::BTreeSet;

use crate::error::{ErrorSeverity, GameError};
use crate::graph::{GameGraph, StationId};
use crate::state::{Game, Item, ItemSet, Move, PlayerId, PlayerKind, TicketKind};

use super::MovePolicy;

/// Reasons a move is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalMove {
    #[error("player {0} is not part of the game")]
    UnknownPlayer(PlayerId),

    #[error("player {player} moved out of turn")]
    NotYourTurn {
        player: PlayerId,
        current: Option<PlayerId>,
    },

    #[error("move number {got} out of sequence, expected {expected}")]
    OutOfSequence { expected: u32, got: u32 },

    #[error("move made in round {got} during round {expected}")]
    WrongRound { expected: u32, got: u32 },

    #[error("player {0} has not been placed on the board")]
    NotPlaced(PlayerId),

    #[error("station {0} does not exist")]
    UnknownStation(StationId),

    #[error("move must spend a ticket")]
    MissingTicket,

    #[error("player {player} holds no {item}")]
    MissingItem { player: PlayerId, item: Item },

    #[error("no {ticket} route from {from} to {to}")]
    NoRoute {
        from: StationId,
        to: StationId,
        ticket: TicketKind,
    },

    #[error("station {0} is occupied by a detective")]
    Occupied(StationId),

    #[error("detectives cannot use a {0}")]
    ForbiddenForDetective(Item),

    #[error("malformed double move")]
    MalformedDouble,
}

impl GameError for IllegalMove {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPlayer(_) => "MOVE_UNKNOWN_PLAYER",
            Self::NotYourTurn { .. } => "MOVE_NOT_YOUR_TURN",
            Self::OutOfSequence { .. } => "MOVE_OUT_OF_SEQUENCE",
            Self::WrongRound { .. } => "MOVE_WRONG_ROUND",
            Self::NotPlaced(_) => "MOVE_NOT_PLACED",
            Self::UnknownStation(_) => "MOVE_UNKNOWN_STATION",
            Self::MissingTicket => "MOVE_MISSING_TICKET",
            Self::MissingItem { .. } => "MOVE_MISSING_ITEM",
            Self::NoRoute { .. } => "MOVE_NO_ROUTE",
            Self::Occupied(_) => "MOVE_OCCUPIED",
            Self::ForbiddenForDetective(_) => "MOVE_FORBIDDEN_FOR_DETECTIVE",
            Self::MalformedDouble => "MOVE_MALFORMED_DOUBLE",
        }
    }
}

/// One reachable destination and the ticket that pays for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveOption {
    pub station: StationId,
    pub ticket: TicketKind,
}

/// Item transfer caused by a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    Spend { player: PlayerId, item: Item },
    Grant { player: PlayerId, item: Item },
}

/// Movement rules of the board game.
///
/// - the mover is the current player and numbers moves in sequence
/// - each step spends a ticket matching a connection to the destination
/// - nobody may enter a station held by a detective
/// - detectives use neither black tickets nor double moves
/// - tickets spent by detectives go to Mr. X
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMovePolicy;

impl StandardMovePolicy {
    fn check_step(
        game: &Game,
        graph: &GameGraph,
        player: PlayerId,
        kind: PlayerKind,
        from: StationId,
        step: &Move,
        budget: &mut ItemSet,
    ) -> Result<(), IllegalMove> {
        let ticket = step
            .item()
            .and_then(Item::as_ticket)
            .ok_or(IllegalMove::MissingTicket)?;
        if kind.is_detective() && ticket == TicketKind::Black {
            return Err(IllegalMove::ForbiddenForDetective(Item::Ticket(ticket)));
        }

        let to = step.station();
        if !graph.contains(to) {
            return Err(IllegalMove::UnknownStation(to));
        }
        if !budget.remove(ticket) {
            return Err(IllegalMove::MissingItem {
                player,
                item: Item::Ticket(ticket),
            });
        }
        if !graph
            .connections_between(from, to)
            .any(|c| ticket.covers(c.kind()))
        {
            return Err(IllegalMove::NoRoute { from, to, ticket });
        }
        if game.detective_stations(Some(player)).contains(&to) {
            return Err(IllegalMove::Occupied(to));
        }
        Ok(())
    }
}

impl MovePolicy for StandardMovePolicy {
    fn possible_moves_from(
        &self,
        game: &Game,
        graph: &GameGraph,
        player: PlayerId,
        from: StationId,
        budget: &ItemSet,
    ) -> BTreeSet<MoveOption> {
        let Some(kind) = game.kind_of(player) else {
            return BTreeSet::new();
        };
        let blocked = game.detective_stations(Some(player));

        let mut options = BTreeSet::new();
        for connection in graph.connections_of(from) {
            let Some(station) = connection.other(from) else {
                continue;
            };
            if blocked.contains(&station) {
                continue;
            }
            for ticket in budget.tickets() {
                if kind.is_detective() && ticket == TicketKind::Black {
                    continue;
                }
                if ticket.covers(connection.kind()) {
                    options.insert(MoveOption { station, ticket });
                }
            }
        }
        options
    }

    fn validate(&self, game: &Game, graph: &GameGraph, mv: &Move) -> Result<(), IllegalMove> {
        let player = mv.player();
        let kind = game
            .kind_of(player)
            .filter(|_| game.contains_player(player))
            .ok_or(IllegalMove::UnknownPlayer(player))?;

        if game.current_player() != Some(player) {
            return Err(IllegalMove::NotYourTurn {
                player,
                current: game.current_player(),
            });
        }
        let expected = game.next_move_number(player);
        if mv.number() != expected {
            return Err(IllegalMove::OutOfSequence {
                expected,
                got: mv.number(),
            });
        }
        if mv.round() != game.current_round() {
            return Err(IllegalMove::WrongRound {
                expected: game.current_round(),
                got: mv.round(),
            });
        }

        let from = game.station_of(player).ok_or(IllegalMove::NotPlaced(player))?;
        let mut budget = game.items(player).cloned().unwrap_or_default();

        if !mv.is_double() {
            return Self::check_step(game, graph, player, kind, from, mv, &mut budget);
        }

        if kind.is_detective() {
            return Err(IllegalMove::ForbiddenForDetective(Item::DoubleMove));
        }
        if mv.item() != Some(Item::DoubleMove) || mv.legs().len() != 2 {
            return Err(IllegalMove::MalformedDouble);
        }
        if !budget.remove(Item::DoubleMove) {
            return Err(IllegalMove::MissingItem {
                player,
                item: Item::DoubleMove,
            });
        }

        let mut at = from;
        for (leg, number) in mv.legs().iter().zip(expected..) {
            if leg.player() != player || leg.round() != mv.round() || leg.is_double() {
                return Err(IllegalMove::MalformedDouble);
            }
            if leg.number() != number {
                return Err(IllegalMove::OutOfSequence {
                    expected: number,
                    got: leg.number(),
                });
            }
            Self::check_step(game, graph, player, kind, at, leg, &mut budget)?;
            at = leg.station();
        }
        if mv.station() != at {
            return Err(IllegalMove::MalformedDouble);
        }
        Ok(())
    }

    fn effects(&self, game: &Game, mv: &Move) -> Vec<ItemEffect> {
        let player = mv.player();
        let mut effects = Vec::new();
        if mv.is_double() {
            effects.push(ItemEffect::Spend {
                player,
                item: Item::DoubleMove,
            });
        }
        for ticket in mv.tickets() {
            let item = Item::Ticket(ticket);
            effects.push(ItemEffect::Spend { player, item });
            if let Some(mr_x) = game.mr_x().filter(|_| !game.is_mr_x(player)) {
                effects.push(ItemEffect::Grant { player: mr_x, item });
            }
        }
        effects
    }
}
