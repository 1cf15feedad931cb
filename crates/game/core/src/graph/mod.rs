//! Transport graph of the board.
//!
//! Stations are joined by undirected connections, each tagged with the mode of
//! transport it represents. Two stations may be joined by several connections
//! as long as their kinds differ (a taxi and a bus line between the same pair,
//! for example). The graph is immutable once built; see [`GraphBuilder`].
mod builder;

pub use builder::{GraphBuilder, GraphError};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Board number of a station.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a station on the board layout (board image coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutPosition {
    pub x: f64,
    pub y: f64,
}

impl LayoutPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node of the transport graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    id: StationId,
    position: LayoutPosition,
}

impl Station {
    pub const fn new(id: StationId, position: LayoutPosition) -> Self {
        Self { id, position }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn position(&self) -> LayoutPosition {
        self.position
    }
}

/// Mode of transport a connection stands for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TransportKind {
    Taxi,
    Bus,
    Underground,
    Ferry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u32);

/// An undirected, typed edge between two stations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    kind: TransportKind,
    ends: (StationId, StationId),
}

impl Connection {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn ends(&self) -> (StationId, StationId) {
        self.ends
    }

    /// Returns the station at the other end, or `None` if `from` is not an end.
    pub fn other(&self, from: StationId) -> Option<StationId> {
        match self.ends {
            (a, b) if a == from => Some(b),
            (a, b) if b == from => Some(a),
            _ => None,
        }
    }

    pub fn joins(&self, a: StationId, b: StationId) -> bool {
        self.other(a) == Some(b)
    }
}

/// Immutable transport graph.
#[derive(Clone, Debug, Default)]
pub struct GameGraph {
    stations: BTreeMap<StationId, Station>,
    connections: Vec<Connection>,
    incident: BTreeMap<StationId, Vec<ConnectionId>>,
}

impl GameGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.keys().copied()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0 as usize)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections incident to `station`, in insertion order.
    pub fn connections_of(&self, station: StationId) -> impl Iterator<Item = &Connection> {
        self.incident
            .get(&station)
            .into_iter()
            .flatten()
            .filter_map(|id| self.connection(*id))
    }

    /// Connections joining `a` and `b`, of any kind.
    pub fn connections_between(
        &self,
        a: StationId,
        b: StationId,
    ) -> impl Iterator<Item = &Connection> {
        self.connections_of(a).filter(move |c| c.joins(a, b))
    }

    /// Direct neighbours reachable by any kind of transport.
    pub fn neighbors(&self, station: StationId) -> BTreeSet<StationId> {
        self.connections_of(station)
            .filter_map(|c| c.other(station))
            .collect()
    }

    /// Direct neighbours reachable by the given kind of transport.
    pub fn neighbors_via(&self, station: StationId, kind: TransportKind) -> BTreeSet<StationId> {
        self.connections_of(station)
            .filter(|c| c.kind == kind)
            .filter_map(|c| c.other(station))
            .collect()
    }

    pub fn is_connected(&self, a: StationId, b: StationId, kind: TransportKind) -> bool {
        self.connections_between(a, b).any(|c| c.kind == kind)
    }
}

impl fmt::Display for GameGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameGraph: {} stations, {} connections",
            self.stations.len(),
            self.connections.len()
        )
    }
}
