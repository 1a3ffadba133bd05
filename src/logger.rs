use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

use crate::error::{GameError, Result};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. Stdout belongs to the game screen.
pub struct Logger {
    sink: Mutex<File>,
}

impl Logger {
    fn new(file: File) -> Self {
        Self { sink: Mutex::new(file) }
    }

    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        if let Ok(mut sink) = self.sink.lock() {
            // A failed log write must not take the game down
            let _ = writeln!(sink, "[{}] {}", timestamp, message);
        }
    }
}

pub fn init_logger(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    LOGGER.get_or_init(|| Logger::new(file));
    Ok(())
}

pub fn enabled() -> bool {
    LOGGER.get().is_some()
}

pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| GameError::LogFile { path: path.to_path_buf(), source })
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::enabled() {
            $crate::logger::log(&format!($($arg)*))
        }
    };
}
