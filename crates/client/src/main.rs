//! Scotland Yard console binary.
//!
//! Environment (a `.env` file is honoured):
//!
//! ```bash
//! SCOTLAND_YARD_BOARD=board.txt SCOTLAND_YARD_RULES=rules.toml scotland-yard
//! ```

use anyhow::Result;
use game_content::{BoardLoader, ConfigLoader};
use game_core::{GameConfig, GameController, Rules};
use scotland_yard_client::{ClientConfig, Console, DEMO_BOARD, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;
    tracing::info!("Starting Scotland Yard client");

    let graph = match &config.board {
        Some(path) => BoardLoader::load(path)?,
        None => {
            tracing::info!("No board configured, using the demo board");
            BoardLoader::parse(DEMO_BOARD)?
        }
    };

    let mut rules = match &config.rules {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = config.seed {
        rules.seed = seed;
    }
    let initial_positions = rules.initial_stations.clone();

    let controller = GameController::new(graph, Rules::standard(rules), initial_positions);
    let mut console = Console::new(controller);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    console.run(stdin.lock(), stdout.lock())?;

    tracing::info!("Client exited");
    Ok(())
}
