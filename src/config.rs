//! Game configuration.
//!
//! Values come from three layers: the built-in defaults, an optional TOML
//! file, then command line overrides applied by the binary.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SnakeError};

/// Size of one grid cell in pixels
pub const DEFAULT_GRID: i32 = 16;
/// Side length of the square board in pixels
pub const DEFAULT_BOARD_SIZE: i32 = 400;
/// Display refreshes per logic tick
pub const DEFAULT_FRAMES_PER_TICK: u32 = 15;
/// Refresh period of the terminal host (~60 Hz)
pub const DEFAULT_FRAME_MS: u64 = 16;
pub const DEFAULT_START: (i32, i32) = (160, 160);
pub const DEFAULT_INITIAL_LENGTH: usize = 4;
/// Largest board side, in cells, that still fits a terminal's u16 coordinates
pub const MAX_CELLS_PER_SIDE: i32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid: i32,
    pub board_size: i32,
    pub frames_per_tick: u32,
    pub frame_ms: u64,
    pub start_x: i32,
    pub start_y: i32,
    /// Starting `max_length` of the snake. The body itself starts empty and
    /// grows into it one cell per tick.
    pub initial_length: usize,
    /// Fixed RNG seed for food placement; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            board_size: DEFAULT_BOARD_SIZE,
            frames_per_tick: DEFAULT_FRAMES_PER_TICK,
            frame_ms: DEFAULT_FRAME_MS,
            start_x: DEFAULT_START.0,
            start_y: DEFAULT_START.1,
            initial_length: DEFAULT_INITIAL_LENGTH,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SnakeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| SnakeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of cells along one side of the board
    pub fn cells_per_side(&self) -> i32 {
        self.board_size / self.grid
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SnakeError::InvalidConfig(msg));

        if self.grid <= 1 {
            return invalid(format!("grid must be at least 2, got {}", self.grid));
        }
        if self.board_size < self.grid || self.board_size % self.grid != 0 {
            return invalid(format!(
                "board_size {} is not a positive multiple of grid {}",
                self.board_size, self.grid
            ));
        }
        if self.cells_per_side() > MAX_CELLS_PER_SIDE {
            return invalid(format!(
                "board is {} cells per side, at most {} are supported",
                self.cells_per_side(),
                MAX_CELLS_PER_SIDE
            ));
        }
        if self.frames_per_tick == 0 {
            return invalid("frames_per_tick must be at least 1".to_string());
        }
        if self.initial_length == 0 {
            return invalid("initial_length must be at least 1".to_string());
        }

        for (axis, v) in [("start_x", self.start_x), ("start_y", self.start_y)].iter() {
            if *v < 0 || *v >= self.board_size || v % self.grid != 0 {
                return invalid(format!(
                    "{} = {} is not a grid-aligned cell inside the board",
                    axis, v
                ));
            }
        }

        Ok(())
    }
}
