//! Staging area for moves picked on the board before they are committed.
//!
//! A front end builds one candidate per player, station first and then the
//! ticket. Mr. X may ask for a further move after the first step, which turns
//! the candidate into a double move. Every selection is checked against the
//! player's possible moves; rejections are reported to subscribers as
//! [`PreparationEvent::Rejected`] and never abort anything.
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ErrorSeverity, GameError};
use crate::graph::{GameGraph, StationId};
use crate::observer::{SubscriptionId, Subscribers};
use crate::rules::MovePolicy;
use crate::state::{Game, GameEvent, Item, ItemSet, Move, MoveProducer, PlayerId, TicketKind};

/// Read access needed to check selections.
#[derive(Clone, Copy)]
pub struct PreparationContext<'a> {
    pub game: &'a Game,
    pub graph: &'a GameGraph,
    pub moves: &'a dyn MovePolicy,
}

/// Why a selection was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrepareError {
    #[error("player {0} cannot prepare a move now")]
    Unauthorized(PlayerId),

    #[error("player {0} is not on the board")]
    NotPlaced(PlayerId),

    #[error("station {station} cannot be reached by {player}")]
    ImpossibleStation { player: PlayerId, station: StationId },

    #[error("{ticket} does not take {player} to {station}")]
    ImpossibleTicket {
        player: PlayerId,
        station: StationId,
        ticket: TicketKind,
    },

    #[error("player {0} has not selected a station")]
    NoStationSelected(PlayerId),

    #[error("player {0} cannot make a further move")]
    NoFurtherMove(PlayerId),
}

impl GameError for PrepareError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "PREPARE_UNAUTHORIZED",
            Self::NotPlaced(_) => "PREPARE_NOT_PLACED",
            Self::ImpossibleStation { .. } => "PREPARE_IMPOSSIBLE_STATION",
            Self::ImpossibleTicket { .. } => "PREPARE_IMPOSSIBLE_TICKET",
            Self::NoStationSelected(_) => "PREPARE_NO_STATION_SELECTED",
            Self::NoFurtherMove(_) => "PREPARE_NO_FURTHER_MOVE",
        }
    }
}

/// Reports published by [`MovePreparer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreparationEvent {
    /// A candidate is complete.
    Prepared(Move),
    Rejected(PrepareError),
    /// The candidate of a player was dropped.
    Cleared(PlayerId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Candidate {
    steps: Vec<(StationId, TicketKind)>,
    station: Option<StationId>,
    further: bool,
}

impl Candidate {
    fn is_complete(&self) -> bool {
        self.station.is_none() && self.steps.len() == if self.further { 2 } else { 1 }
    }
}

/// Per-player move candidates.
#[derive(Debug)]
pub struct MovePreparer {
    fixed_turn_order: bool,
    candidates: BTreeMap<PlayerId, Candidate>,
    subscribers: Subscribers<PreparationEvent>,
}

impl Default for MovePreparer {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePreparer {
    /// Starts with fixed turn order on.
    pub fn new() -> Self {
        Self {
            fixed_turn_order: true,
            candidates: BTreeMap::new(),
            subscribers: Subscribers::new(),
        }
    }

    pub fn fixed_turn_order(&self) -> bool {
        self.fixed_turn_order
    }

    /// With fixed turn order only the current player may prepare. Without it
    /// detectives prepare at any time and Mr. X still only on his turn.
    pub fn set_fixed_turn_order(&mut self, fixed: bool) {
        self.fixed_turn_order = fixed;
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PreparationEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn may_prepare(&self, game: &Game, player: PlayerId) -> bool {
        if !game.contains_player(player) {
            return false;
        }
        let on_turn = game.current_player() == Some(player);
        if self.fixed_turn_order || game.is_mr_x(player) {
            on_turn
        } else {
            true
        }
    }

    /// Picks the destination of the next step and returns the tickets that
    /// can pay for it. An empty set means the selection was rejected.
    pub fn select_station(
        &mut self,
        ctx: PreparationContext<'_>,
        player: PlayerId,
        station: StationId,
    ) -> BTreeSet<TicketKind> {
        let tickets = match self.tickets_to(ctx, player, station) {
            Ok(tickets) => tickets,
            Err(err) => {
                self.reject(err);
                return BTreeSet::new();
            }
        };

        let candidate = self.candidates.entry(player).or_default();
        if candidate.is_complete() {
            *candidate = Candidate::default();
        }
        candidate.station = Some(station);
        tracing::debug!(%player, %station, "station selected");
        tickets
    }

    /// Pays the selected station with `ticket`. Returns true if accepted.
    pub fn select_ticket(
        &mut self,
        ctx: PreparationContext<'_>,
        player: PlayerId,
        ticket: TicketKind,
    ) -> bool {
        let Some(station) = self.candidates.get(&player).and_then(|c| c.station) else {
            self.reject(PrepareError::NoStationSelected(player));
            return false;
        };
        match self.tickets_to(ctx, player, station) {
            Ok(tickets) if tickets.contains(&ticket) => {}
            Ok(_) => {
                self.reject(PrepareError::ImpossibleTicket {
                    player,
                    station,
                    ticket,
                });
                return false;
            }
            Err(err) => {
                self.reject(err);
                return false;
            }
        }

        let Some(candidate) = self.candidates.get_mut(&player) else {
            return false;
        };
        candidate.station = None;
        candidate.steps.push((station, ticket));
        if candidate.is_complete() {
            let candidate = candidate.clone();
            if let Some(mv) = Self::build(ctx.game, player, &candidate) {
                tracing::debug!(%mv, "move prepared");
                self.subscribers.publish(&PreparationEvent::Prepared(mv));
            }
        }
        true
    }

    /// Lets Mr. X follow the current candidate with another step, spending
    /// a double move card. Returns true if accepted.
    pub fn request_further_move(&mut self, ctx: PreparationContext<'_>, player: PlayerId) -> bool {
        if !self.may_prepare(ctx.game, player) {
            self.reject(PrepareError::Unauthorized(player));
            return false;
        }
        let has_card = ctx
            .game
            .items(player)
            .is_some_and(|items| items.contains(Item::DoubleMove));
        let candidate = self.candidates.entry(player).or_default();
        if !ctx.game.is_mr_x(player) || !has_card || candidate.steps.len() > 1 {
            self.reject(PrepareError::NoFurtherMove(player));
            return false;
        }
        candidate.further = true;
        true
    }

    /// The completed candidate of `player`, numbered for the game as it is now.
    pub fn get_move(&self, game: &Game, player: PlayerId) -> Option<Move> {
        self.candidates
            .get(&player)
            .filter(|c| c.is_complete())
            .and_then(|c| Self::build(game, player, c))
    }

    /// Like [`Self::get_move`] but also drops the candidate.
    pub fn take_move(&mut self, game: &Game, player: PlayerId) -> Option<Move> {
        let mv = self.get_move(game, player)?;
        self.candidates.remove(&player);
        Some(mv)
    }

    pub fn has_candidate(&self, player: PlayerId) -> bool {
        self.candidates.contains_key(&player)
    }

    pub fn clear(&mut self, player: PlayerId) {
        if self.candidates.remove(&player).is_some() {
            self.subscribers.publish(&PreparationEvent::Cleared(player));
        }
    }

    pub fn clear_all(&mut self) {
        let players: Vec<PlayerId> = self.candidates.keys().copied().collect();
        for player in players {
            self.clear(player);
        }
    }

    /// Drops candidates invalidated by a change of the move log.
    pub fn sync(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MoveDone(mv) | GameEvent::MoveUndone(mv) => self.clear(mv.player()),
            GameEvent::MovesCleared => self.clear_all(),
            _ => {}
        }
    }

    fn reject(&mut self, err: PrepareError) {
        tracing::debug!(%err, "selection rejected");
        self.subscribers.publish(&PreparationEvent::Rejected(err));
    }

    fn tickets_to(
        &self,
        ctx: PreparationContext<'_>,
        player: PlayerId,
        station: StationId,
    ) -> Result<BTreeSet<TicketKind>, PrepareError> {
        if !self.may_prepare(ctx.game, player) {
            return Err(PrepareError::Unauthorized(player));
        }
        let candidate = self
            .candidates
            .get(&player)
            .filter(|c| !c.is_complete())
            .cloned()
            .unwrap_or_default();

        let from = match candidate.steps.last() {
            Some((at, _)) => *at,
            None => ctx
                .game
                .station_of(player)
                .ok_or(PrepareError::NotPlaced(player))?,
        };
        let budget = Self::remaining_budget(ctx.game, player, &candidate);

        let tickets: BTreeSet<TicketKind> = ctx
            .moves
            .possible_moves_from(ctx.game, ctx.graph, player, from, &budget)
            .into_iter()
            .filter(|option| option.station == station)
            .map(|option| option.ticket)
            .collect();
        if tickets.is_empty() {
            return Err(PrepareError::ImpossibleStation { player, station });
        }
        Ok(tickets)
    }

    fn remaining_budget(game: &Game, player: PlayerId, candidate: &Candidate) -> ItemSet {
        let mut budget = game.items(player).cloned().unwrap_or_default();
        if candidate.further {
            budget.remove(Item::DoubleMove);
        }
        for (_, ticket) in &candidate.steps {
            budget.remove(*ticket);
        }
        budget
    }

    fn build(game: &Game, player: PlayerId, candidate: &Candidate) -> Option<Move> {
        match candidate.steps.as_slice() {
            [(station, ticket)] => Some(MoveProducer::single(game, player, *station, *ticket)),
            [first, second] => Some(MoveProducer::double(game, player, [*first, *second])),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::graph::{LayoutPosition, TransportKind};
    use crate::rules::StandardMovePolicy;
    use crate::state::{GameState, PlayerKind};

    fn line_graph() -> GameGraph {
        let mut builder = GameGraph::builder();
        for id in 1..=4 {
            builder
                .add_station(StationId(id), LayoutPosition::default())
                .unwrap();
        }
        builder
            .add_connection(TransportKind::Taxi, StationId(1), StationId(2))
            .unwrap();
        builder
            .add_connection(TransportKind::Bus, StationId(1), StationId(2))
            .unwrap();
        builder
            .add_connection(TransportKind::Taxi, StationId(2), StationId(3))
            .unwrap();
        builder
            .add_connection(TransportKind::Taxi, StationId(3), StationId(4))
            .unwrap();
        builder.build()
    }

    struct Fixture {
        state: GameState,
        graph: GameGraph,
        mr_x: PlayerId,
        detective: PlayerId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut state = GameState::new();
            let mr_x = state.create_player(PlayerKind::MrX);
            state.set_mr_x(Some(mr_x));
            let detective = state.create_player(PlayerKind::Detective);
            state.insert_detective(0, detective);

            state.set_items(
                mr_x,
                ItemSet::new()
                    .with(TicketKind::Taxi, 2)
                    .with(TicketKind::Bus, 1)
                    .with(Item::DoubleMove, 1),
            );
            state.set_items(detective, ItemSet::new().with(TicketKind::Taxi, 1));
            let placements = [(mr_x, StationId(1)), (detective, StationId(4))];
            for (player, station) in placements {
                let initial = MoveProducer::initial(state.game(), player, station);
                state.push_move(initial);
            }
            state.set_current_round(1);
            state.set_current_player(Some(mr_x));

            Self {
                state,
                graph: line_graph(),
                mr_x,
                detective,
            }
        }

        fn ctx(&self) -> PreparationContext<'_> {
            PreparationContext {
                game: self.state.game(),
                graph: &self.graph,
                moves: &StandardMovePolicy,
            }
        }
    }

    fn recording(preparer: &mut MovePreparer) -> Rc<RefCell<Vec<PreparationEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        preparer.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn station_then_ticket_prepares_a_single_move() {
        let fx = Fixture::new();
        let mut preparer = MovePreparer::new();
        let events = recording(&mut preparer);

        let tickets = preparer.select_station(fx.ctx(), fx.mr_x, StationId(2));
        assert_eq!(
            tickets,
            BTreeSet::from([TicketKind::Taxi, TicketKind::Bus])
        );
        assert!(preparer.select_ticket(fx.ctx(), fx.mr_x, TicketKind::Bus));

        let expected = MoveProducer::single(fx.state.game(), fx.mr_x, StationId(2), TicketKind::Bus);
        assert_eq!(*events.borrow(), vec![PreparationEvent::Prepared(expected.clone())]);
        assert_eq!(preparer.take_move(fx.state.game(), fx.mr_x), Some(expected));
        assert!(!preparer.has_candidate(fx.mr_x));
    }

    #[test]
    fn further_move_builds_a_double_move() {
        let fx = Fixture::new();
        let mut preparer = MovePreparer::new();

        assert!(preparer.request_further_move(fx.ctx(), fx.mr_x));
        preparer.select_station(fx.ctx(), fx.mr_x, StationId(2));
        assert!(preparer.select_ticket(fx.ctx(), fx.mr_x, TicketKind::Taxi));
        assert!(preparer.get_move(fx.state.game(), fx.mr_x).is_none());

        preparer.select_station(fx.ctx(), fx.mr_x, StationId(3));
        assert!(preparer.select_ticket(fx.ctx(), fx.mr_x, TicketKind::Taxi));

        let mv = preparer.get_move(fx.state.game(), fx.mr_x).unwrap();
        assert!(mv.is_double());
        assert_eq!(mv.station(), StationId(3));
        assert_eq!(mv.tickets(), vec![TicketKind::Taxi, TicketKind::Taxi]);
    }

    #[test]
    fn impossible_station_is_reported_not_returned() {
        let fx = Fixture::new();
        let mut preparer = MovePreparer::new();
        let events = recording(&mut preparer);

        let tickets = preparer.select_station(fx.ctx(), fx.mr_x, StationId(3));

        assert!(tickets.is_empty());
        assert_eq!(
            *events.borrow(),
            vec![PreparationEvent::Rejected(PrepareError::ImpossibleStation {
                player: fx.mr_x,
                station: StationId(3),
            })]
        );
    }

    #[test]
    fn detectives_prepare_out_of_turn_only_without_fixed_order() {
        let fx = Fixture::new();
        let mut preparer = MovePreparer::new();
        let events = recording(&mut preparer);

        assert!(preparer
            .select_station(fx.ctx(), fx.detective, StationId(3))
            .is_empty());
        assert_eq!(
            events.borrow().last(),
            Some(&PreparationEvent::Rejected(PrepareError::Unauthorized(fx.detective)))
        );

        preparer.set_fixed_turn_order(false);
        let tickets = preparer.select_station(fx.ctx(), fx.detective, StationId(3));
        assert_eq!(tickets, BTreeSet::from([TicketKind::Taxi]));
    }

    #[test]
    fn mr_x_waits_for_his_turn_even_without_fixed_order() {
        let mut fx = Fixture::new();
        fx.state.set_current_player(Some(fx.detective));
        let mut preparer = MovePreparer::new();
        preparer.set_fixed_turn_order(false);

        assert!(!preparer.may_prepare(fx.state.game(), fx.mr_x));
        assert!(preparer.may_prepare(fx.state.game(), fx.detective));
    }

    #[test]
    fn detectives_cannot_request_further_moves() {
        let mut fx = Fixture::new();
        fx.state.set_current_player(Some(fx.detective));
        let mut preparer = MovePreparer::new();

        assert!(!preparer.request_further_move(fx.ctx(), fx.detective));
    }

    #[test]
    fn move_log_changes_drop_candidates() {
        let fx = Fixture::new();
        let mut preparer = MovePreparer::new();
        preparer.select_station(fx.ctx(), fx.mr_x, StationId(2));
        let events = recording(&mut preparer);

        preparer.sync(&GameEvent::MovesCleared);

        assert!(!preparer.has_candidate(fx.mr_x));
        assert_eq!(*events.borrow(), vec![PreparationEvent::Cleared(fx.mr_x)]);
    }
}
