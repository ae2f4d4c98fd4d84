use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grid_snake::game::SnakeGame;
use grid_snake::GameConfig;

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Snake on a fixed grid, in the terminal")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Size of one grid cell in pixels
    #[arg(long)]
    grid: Option<i32>,

    /// Side length of the square board in pixels
    #[arg(long)]
    board_size: Option<i32>,

    /// Display refreshes per snake step (lower is faster)
    #[arg(long)]
    frames_per_tick: Option<u32>,

    /// Milliseconds between display refreshes
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Starting length of the snake
    #[arg(long)]
    initial_length: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid) = self.grid {
            config.grid = grid;
        }
        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if let Some(frames) = self.frames_per_tick {
            config.frames_per_tick = frames;
        }
        if let Some(ms) = self.frame_ms {
            config.frame_ms = ms;
        }
        if let Some(len) = self.initial_length {
            config.initial_length = len;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    tracing::info!(?config, "starting");

    let mut game = SnakeGame::new(config).context("Failed to start the game")?;
    game.run().context("Game session failed")?;

    Ok(())
}
