//! Rules configuration loader.

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a rules configuration. Omitted fields keep the board game's
    /// standard values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), last_round = config.last_round, "rules loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).context("rules configuration is not valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use game_core::{StationId, TicketAllowance};

    use super::*;

    #[test]
    fn empty_file_yields_standard_rules() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let config = ConfigLoader::parse(
            r#"
last_round = 12
uncover_moves = [2, 6, 12]
initial_stations = [13, 26, 29]
seed = 7

[mr_x_tickets]
taxi = 5
bus = 3
underground = 3
"#,
        )
        .unwrap();

        assert_eq!(config.last_round, 12);
        assert_eq!(config.uncover_moves, [2, 6, 12].into());
        assert_eq!(
            config.initial_stations,
            [StationId(13), StationId(26), StationId(29)].into()
        );
        assert_eq!(config.seed, 7);
        assert_eq!(config.mr_x_tickets, TicketAllowance::new(5, 3, 3));
        assert_eq!(config.detective_tickets, TicketAllowance::DETECTIVE);
        assert_eq!(config.double_moves, GameConfig::DEFAULT_DOUBLE_MOVES);
    }

    #[test]
    fn ticket_tables_may_be_partial() {
        let config = ConfigLoader::parse("[mr_x_tickets]\ntaxi = 5\n").unwrap();

        assert_eq!(config.mr_x_tickets, TicketAllowance::new(5, 0, 0));
        assert_eq!(config.detective_tickets, TicketAllowance::DETECTIVE);
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "double_moves = 0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.double_moves, 0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = ConfigLoader::parse("last_round = \"soon\"").unwrap_err();

        assert!(err.to_string().contains("not valid TOML"));
    }
}
