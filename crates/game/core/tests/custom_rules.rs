mod common;

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use common::{fixed_rules, seated, started};
use game_core::{
    ControllerError, Game, GameConfig, GameGraph, GameStateAccessPolicy, GameStatus, GameWin,
    GameWinPolicy, IllegalMove, ItemEffect, ItemSet, Move, MoveOption, MovePolicy, MoveProducer,
    PlayerId, Requester, StandardMovePolicy, StateAccess, StationId, TicketKind, TurnPolicy,
};

/// Keeps handing the turn to Mr. X without ever leaving the initial round.
struct StuckTurns;

impl TurnPolicy for StuckTurns {
    fn next_player(&self, game: &Game, _graph: &GameGraph) -> Option<PlayerId> {
        game.mr_x()
    }

    fn next_round_number(&self, _game: &Game, _graph: &GameGraph) -> u32 {
        0
    }
}

struct DetectivesAlwaysWin;

impl GameWinPolicy for DetectivesAlwaysWin {
    fn is_game_won(&self, _game: &Game, _graph: &GameGraph) -> GameWin {
        GameWin::Detectives
    }
}

/// Standard rules, except that only taxis run.
struct TaxiStrike;

impl MovePolicy for TaxiStrike {
    fn possible_moves_from(
        &self,
        game: &Game,
        graph: &GameGraph,
        player: PlayerId,
        from: StationId,
        budget: &ItemSet,
    ) -> BTreeSet<MoveOption> {
        StandardMovePolicy
            .possible_moves_from(game, graph, player, from, budget)
            .into_iter()
            .filter(|option| option.ticket == TicketKind::Taxi)
            .collect()
    }

    fn validate(&self, game: &Game, graph: &GameGraph, mv: &Move) -> Result<(), IllegalMove> {
        StandardMovePolicy.validate(game, graph, mv)?;
        if mv.tickets().iter().any(|t| *t != TicketKind::Taxi) {
            return Err(IllegalMove::MissingTicket);
        }
        Ok(())
    }

    fn effects(&self, game: &Game, mv: &Move) -> Vec<ItemEffect> {
        StandardMovePolicy.effects(game, mv)
    }
}

/// Mr. X shows himself on every move.
struct OpenMrX {
    every_move: BTreeSet<u32>,
}

impl GameStateAccessPolicy for OpenMrX {
    fn uncover_moves(&self) -> &BTreeSet<u32> {
        &self.every_move
    }
}

#[test]
fn stalled_turn_order_rolls_the_start_back() {
    let rules = fixed_rules(GameConfig::default(), &[1, 3]).with_turn(StuckTurns);
    let (mut controller, _, _) = seated(rules, 1);
    let before = controller.game().clone();

    let result = controller.start();

    assert!(matches!(
        result,
        Err(ControllerError::TurnOrderStalled { .. })
    ));
    assert_eq!(controller.status(), GameStatus::NotInGame);
    assert_eq!(*controller.game(), before);
    assert!(controller.can_undo());
}

#[test]
fn a_win_found_at_placement_keeps_the_game_closed() {
    let rules = fixed_rules(GameConfig::default(), &[1, 3]).with_win(DetectivesAlwaysWin);
    let (mut controller, _, _) = seated(rules, 1);

    controller.start().unwrap();

    assert_eq!(controller.status(), GameStatus::NotInGame);
    assert_eq!(controller.win(), GameWin::Detectives);
    assert_eq!(controller.game().moves().len(), 2);
}

#[test]
fn a_replaced_move_policy_decides_legality() {
    let rules = fixed_rules(GameConfig::default(), &[1, 3]).with_moves(TaxiStrike);
    let (mut controller, mr_x, _) = seated(rules, 1);
    controller.start().unwrap();

    let bus = MoveProducer::single(controller.game(), mr_x, StationId(5), TicketKind::Bus);
    assert_eq!(
        controller.make_move(bus),
        Err(ControllerError::IllegalMove(IllegalMove::MissingTicket))
    );
    let options = controller
        .rules()
        .moves()
        .possible_moves(controller.game(), controller.graph(), mr_x);
    assert!(options.iter().all(|o| o.ticket == TicketKind::Taxi));

    let taxi = MoveProducer::single(controller.game(), mr_x, StationId(8), TicketKind::Taxi);
    controller.make_move(taxi).unwrap();
    assert_eq!(controller.game().station_of(mr_x), Some(StationId(8)));
}

#[test]
fn a_replaced_access_policy_controls_the_detective_view() {
    let rules = fixed_rules(GameConfig::default(), &[1, 3]).with_access(OpenMrX {
        every_move: (0..=24).collect(),
    });
    let (mut controller, mr_x, _) = seated(rules, 1);
    controller.start().unwrap();

    let mv = MoveProducer::single(controller.game(), mr_x, StationId(2), TicketKind::Taxi);
    controller.make_move(mv).unwrap();

    let StateAccess::Detective(view) = controller.state_for(Requester::Detective) else {
        panic!("detectives must get a restricted view");
    };
    assert_eq!(view.station_of(mr_x), Some(StationId(2)));
}

#[test]
fn unsubscribed_game_listeners_stay_silent() {
    let (mut controller, mr_x, _) = started(&[3]);
    let heard = Rc::new(Cell::new(0));
    let counter = Rc::clone(&heard);
    let id = controller.subscribe_game_events(move |_| counter.set(counter.get() + 1));

    assert!(controller.unsubscribe_game_events(id));
    let mv = MoveProducer::single(controller.game(), mr_x, StationId(2), TicketKind::Taxi);
    controller.make_move(mv).unwrap();

    assert_eq!(heard.get(), 0);
    assert!(!controller.unsubscribe_game_events(id));
}
