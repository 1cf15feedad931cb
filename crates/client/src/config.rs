//! Client configuration from the process environment.
use std::env;
use std::path::PathBuf;

/// Where the client finds its board and rules, and where it logs.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Board description file. The bundled demo board when unset.
    pub board: Option<PathBuf>,

    /// Rules configuration (TOML). Standard rules when unset.
    pub rules: Option<PathBuf>,

    /// Overrides the seed of the rules configuration.
    pub seed: Option<u64>,

    /// Log directory. Derived from the platform cache directory when unset.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// - `SCOTLAND_YARD_BOARD`
    /// - `SCOTLAND_YARD_RULES`
    /// - `SCOTLAND_YARD_SEED`
    /// - `SCOTLAND_YARD_LOG_DIR`
    pub fn from_env() -> Self {
        Self {
            board: read_env("SCOTLAND_YARD_BOARD"),
            rules: read_env("SCOTLAND_YARD_RULES"),
            seed: read_env("SCOTLAND_YARD_SEED"),
            log_dir: read_env("SCOTLAND_YARD_LOG_DIR"),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
