use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("terminal is {have_w}x{have_h}, the board needs at least {need_w}x{need_h}")]
    TerminalTooSmall {
        need_w: usize,
        need_h: usize,
        have_w: u16,
        have_h: u16,
    },

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
