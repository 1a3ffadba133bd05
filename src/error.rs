use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("terminal is {width}x{height}, the board needs at least {min_width}x{min_height}")]
    TerminalTooSmall {
        width: TermInt,
        height: TermInt,
        min_width: TermInt,
        min_height: TermInt,
    },

    #[error("could not open log file '{}': {source}", .path.display())]
    LogFile { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, GameError>;
