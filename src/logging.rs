use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::settings::get_game_data_dir;

pub const LOG_FILE: &str = "log.txt";

// Appends every record to `<log_path>/log.txt`. The terminal belongs to the
// TUI, so nothing is written to stdout or stderr.
#[derive(Debug)]
pub struct FileLogger {
    log_path: PathBuf,
    level: LevelFilter,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl FileLogger {
    pub fn new(log_path: PathBuf, level: LevelFilter) -> Self {
        Self { log_path, level }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_path.join(LOG_FILE)
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "[{}] {} {} - {}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            );

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.log_file())
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

pub fn init(debug_mode: bool) -> Result<()> {
    let log_path = get_game_data_dir()?;
    create_dir_all(&log_path)?;

    let level = if debug_mode {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let logger = LOGGER
        .try_insert(FileLogger::new(log_path, level))
        .map_err(|_| AppError::LoggerAlreadyInitialized)?;

    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
