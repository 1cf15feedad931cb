//! Console client for the Scotland Yard game core.
//!
//! The binary is the composition root: it reads [`ClientConfig`] from the
//! environment, installs logging, loads the board and rules through
//! `game-content` and hands a [`game_core::GameController`] to the
//! [`Console`].

pub mod command;
pub mod config;
pub mod console;
pub mod labels;
pub mod logging;

pub use command::{Command, ParseError};
pub use config::ClientConfig;
pub use console::{Console, ConsoleError, Flow};
pub use labels::PlayerLabels;

/// Board used when no board description is configured.
pub const DEMO_BOARD: &str = include_str!("../data/demo-board.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_board_loads() {
        let graph = game_content::BoardLoader::parse(DEMO_BOARD).unwrap();

        assert_eq!(graph.station_count(), 30);
        assert!(graph.connection_count() > graph.station_count());
    }
}
