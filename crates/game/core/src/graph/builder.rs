use crate::error::{ErrorSeverity, GameError};

use super::{
    Connection, ConnectionId, GameGraph, LayoutPosition, Station, StationId, TransportKind,
};

/// Errors raised while assembling a [`GameGraph`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("station {0} declared twice")]
    DuplicateStation(StationId),

    #[error("connection references undeclared station {0}")]
    UnknownStation(StationId),

    #[error("{kind} connection between {a} and {b} declared twice")]
    DuplicateConnection {
        kind: TransportKind,
        a: StationId,
        b: StationId,
    },

    #[error("connection loops back to station {0}")]
    SelfLoop(StationId),
}

impl GameError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateStation(_) => "GRAPH_DUPLICATE_STATION",
            Self::UnknownStation(_) => "GRAPH_UNKNOWN_STATION",
            Self::DuplicateConnection { .. } => "GRAPH_DUPLICATE_CONNECTION",
            Self::SelfLoop(_) => "GRAPH_SELF_LOOP",
        }
    }
}

/// Incrementally assembles a [`GameGraph`].
///
/// The graph only becomes visible through [`GraphBuilder::build`], so a failed
/// load never exposes a partially constructed board.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: GameGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_station(
        &mut self,
        id: StationId,
        position: LayoutPosition,
    ) -> Result<&mut Self, GraphError> {
        if self.graph.stations.contains_key(&id) {
            return Err(GraphError::DuplicateStation(id));
        }
        self.graph.stations.insert(id, Station::new(id, position));
        self.graph.incident.insert(id, Vec::new());
        Ok(self)
    }

    pub fn add_connection(
        &mut self,
        kind: TransportKind,
        a: StationId,
        b: StationId,
    ) -> Result<ConnectionId, GraphError> {
        for end in [a, b] {
            if !self.graph.contains(end) {
                return Err(GraphError::UnknownStation(end));
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        if self.graph.is_connected(a, b, kind) {
            return Err(GraphError::DuplicateConnection { kind, a, b });
        }

        let id = ConnectionId(self.graph.connections.len() as u32);
        self.graph.connections.push(Connection {
            id,
            kind,
            ends: (a, b),
        });
        for end in [a, b] {
            self.graph.incident.entry(end).or_default().push(id);
        }
        Ok(id)
    }

    pub fn build(self) -> GameGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stations() -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        builder
            .add_station(StationId(1), LayoutPosition::default())
            .unwrap()
            .add_station(StationId(2), LayoutPosition::default())
            .unwrap();
        builder
    }

    #[test]
    fn rejects_edge_to_undeclared_station() {
        let mut builder = two_stations();

        let result = builder.add_connection(TransportKind::Taxi, StationId(1), StationId(9));

        assert_eq!(result, Err(GraphError::UnknownStation(StationId(9))));
    }

    #[test]
    fn rejects_duplicate_station() {
        let mut builder = two_stations();

        let result = builder
            .add_station(StationId(2), LayoutPosition::new(4.0, 2.0))
            .map(|_| ());

        assert_eq!(result, Err(GraphError::DuplicateStation(StationId(2))));
    }

    #[test]
    fn rejects_same_kind_twice_in_either_direction() {
        let mut builder = two_stations();
        builder
            .add_connection(TransportKind::Bus, StationId(1), StationId(2))
            .unwrap();

        let result = builder.add_connection(TransportKind::Bus, StationId(2), StationId(1));

        assert!(matches!(
            result,
            Err(GraphError::DuplicateConnection {
                kind: TransportKind::Bus,
                ..
            })
        ));
    }
}
