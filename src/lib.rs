//! Grid snake for the terminal.
//!
//! The game logic (`snake`, `food`, `collision`, `state`, `game_loop`) knows
//! nothing about terminals: it draws through the [`render::Surface`] and
//! [`render::ScoreSink`] traits. `term` and `game` host it in a crossterm
//! terminal.

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod render;
pub mod snake;
pub mod state;
pub mod term;

pub use config::GameConfig;
pub use error::{Result, SnakeError};
pub use game_loop::GameLoop;
