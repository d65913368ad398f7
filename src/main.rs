use std::fs::File;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snake::config::{Args, GameConfig};
use snake::input::{self, SharedInput};
use snake::term::{CrosstermKeys, TermManager};
use snake::{Direction, Driver, Error, SnakeGame};

fn main() -> Result<()> {
    // Usage errors exit here, before the terminal is touched.
    let args = Args::parse();
    init_logging(&args)?;

    let config = GameConfig::from_args(&args)?;
    info!(
        width = config.board.width(),
        height = config.board.height(),
        tick_ms = config.frame_interval.as_millis() as u64,
        "starting"
    );
    if !TermManager::fits(config.board).unwrap_or(true) {
        warn!("terminal is smaller than the board, drawing will be clipped");
    }

    let mut term = TermManager::new();
    term.setup()?;

    let result = run(config);

    // Always try to restore terminal state.
    let _ = term.restore();
    result
}

fn run(config: GameConfig) -> Result<()> {
    let shared = Arc::new(SharedInput::new(Direction::default()));
    let listener = input::spawn(CrosstermKeys, Arc::clone(&shared))?;

    let game = SnakeGame::new(config.board, TermManager::new(), rand::thread_rng());
    let mut driver = Driver::new(game, Arc::clone(&shared), config.frame_interval);
    let played = driver.run();

    // The listener only returns on its own once it has seen the exit key or
    // failed; if the driver bailed out first it stays parked on the tty.
    if !shared.is_running() {
        listener.join().map_err(|_| Error::InputThread)??;
    }
    played?;
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}
