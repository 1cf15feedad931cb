//! Scotland Yard game core: board graph, game model, rules and controller.
//!
//! The [`GameController`] owns the [`GameState`] and is the only writer of it.
//! Front ends issue commands, read the [`Game`] (or the detective-restricted
//! [`DetectiveView`]) and follow changes through subscriptions. Rules are
//! pluggable through the policy traits bundled in [`Rules`].
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod observer;
pub mod prepare;
pub mod rules;
pub mod state;

pub use config::{GameConfig, TicketAllowance};
pub use engine::{
    ControllerError, Edit, EditLog, GameController, GameStatus, Operation, Requester,
    StateAccess, StatusChange, TurnSnapshot,
};
pub use error::{ErrorSeverity, GameError};
pub use graph::{
    Connection, ConnectionId, GameGraph, GraphBuilder, GraphError, LayoutPosition, Station,
    StationId, TransportKind,
};
pub use observer::{SubscriptionId, Subscribers};
pub use prepare::{MovePreparer, PreparationContext, PreparationEvent, PrepareError};
pub use rules::{
    GameInitPolicy, GameStateAccessPolicy, GameWin, GameWinPolicy, IllegalMove, ItemEffect,
    MoveOption, MovePolicy, Rules, StandardAccessPolicy, StandardInitPolicy, StandardMovePolicy,
    StandardTurnPolicy, StandardWinPolicy, TurnPolicy,
};
pub use state::{
    DetectiveView, Game, GameEvent, GameState, INITIAL_ROUND_NUMBER, Item, ItemSet, Move,
    MoveProducer, PlayerId, PlayerKind, TicketKind, VisibleMove,
};
