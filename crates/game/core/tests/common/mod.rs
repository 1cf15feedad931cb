#![allow(dead_code)]

use std::collections::BTreeSet;

use game_core::{
    Game, GameConfig, GameController, GameGraph, GameInitPolicy, ItemSet, LayoutPosition,
    PlayerId, Rules, StandardInitPolicy, StationId, TransportKind,
};

/// Eight stations on a taxi ring with a few shortcuts.
///
/// ```text
/// taxi:        1-2-3-4-5-6-7-8-1
/// bus:         1-5, 3-7
/// underground: 2-6
/// ferry:       4-8
/// ```
pub fn ring_board() -> GameGraph {
    let mut builder = GameGraph::builder();
    for id in 1..=8 {
        builder
            .add_station(
                StationId(id),
                LayoutPosition {
                    x: f64::from(id),
                    y: 0.0,
                },
            )
            .unwrap();
    }
    for id in 1..=8 {
        builder
            .add_connection(TransportKind::Taxi, StationId(id), StationId(id % 8 + 1))
            .unwrap();
    }
    let shortcuts = [
        (TransportKind::Bus, 1, 5),
        (TransportKind::Bus, 3, 7),
        (TransportKind::Underground, 2, 6),
        (TransportKind::Ferry, 4, 8),
    ];
    for (kind, a, b) in shortcuts {
        builder
            .add_connection(kind, StationId(a), StationId(b))
            .unwrap();
    }
    builder.build()
}

/// Standard tickets, but players start on fixed stations in turn order.
pub struct FixedPlacement {
    tickets: StandardInitPolicy,
    stations: Vec<StationId>,
}

impl GameInitPolicy for FixedPlacement {
    fn create_item_set(&self, game: &Game, player: PlayerId) -> ItemSet {
        self.tickets.create_item_set(game, player)
    }

    fn suggest_initial_station(
        &self,
        game: &Game,
        _graph: &GameGraph,
        _allowed: &BTreeSet<StationId>,
        player: PlayerId,
    ) -> Option<StationId> {
        let index = game.players().iter().position(|p| *p == player)?;
        self.stations.get(index).copied()
    }
}

pub fn fixed_rules(config: GameConfig, stations: &[u32]) -> Rules {
    let placement = FixedPlacement {
        tickets: StandardInitPolicy::new(std::sync::Arc::new(config.clone())),
        stations: stations.iter().copied().map(StationId).collect(),
    };
    Rules::standard(config).with_init(placement)
}

/// A controller seated with Mr. X and `detectives` detectives.
pub fn seated(rules: Rules, detectives: usize) -> (GameController, PlayerId, Vec<PlayerId>) {
    let mut controller = GameController::new(ring_board(), rules, BTreeSet::new());
    let mr_x = controller.new_mr_x().unwrap();
    let ds = (0..detectives)
        .map(|_| controller.new_detective().unwrap())
        .collect();
    (controller, mr_x, ds)
}

/// Mr. X on 1, detectives on the given stations, game started.
pub fn started(detective_stations: &[u32]) -> (GameController, PlayerId, Vec<PlayerId>) {
    let mut stations = vec![1];
    stations.extend_from_slice(detective_stations);
    let rules = fixed_rules(GameConfig::default(), &stations);
    let (mut controller, mr_x, ds) = seated(rules, detective_stations.len());
    controller.start().unwrap();
    (controller, mr_x, ds)
}
