//! Daily log file persistence
//!
//! Lines are appended to `logs/tizo_kiosk_<YYYY-MM-DD>.log`; the file rolls
//! over when the local date changes.

use chrono::Local;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

struct FileLogger {
    directory: PathBuf,
    date: String,
    writer: BufWriter<File>,
}

impl FileLogger {
    fn open(directory: PathBuf) -> std::io::Result<Self> {
        let date = Local::now().format("%Y-%m-%d").to_string();
        let writer = open_log_file(&directory, &date)?;
        Ok(Self {
            directory,
            date,
            writer,
        })
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        let today = Local::now().format("%Y-%m-%d").to_string();
        if today != self.date {
            self.writer.flush()?;
            self.writer = open_log_file(&self.directory, &today)?;
            self.date = today;
        }
        writeln!(self.writer, "{}", line)
    }
}

fn open_log_file(directory: &PathBuf, date: &str) -> std::io::Result<BufWriter<File>> {
    std::fs::create_dir_all(directory)?;
    let path = directory.join(format!("tizo_kiosk_{}.log", date));
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

static FILE_LOGGER: Lazy<Mutex<Option<FileLogger>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file in the logs directory
///
/// Failure to open is reported on stderr and leaves console logging working.
pub fn init_file_logging() {
    if !super::config::get_logger_config().file_logging {
        return;
    }

    match FileLogger::open(crate::paths::get_logs_directory()) {
        Ok(logger) => *FILE_LOGGER.lock() = Some(logger),
        Err(e) => eprintln!("⚠️  Failed to open log file: {}", e),
    }
}

pub fn write_to_file(line: &str) {
    let mut guard = FILE_LOGGER.lock();
    if let Some(logger) = guard.as_mut() {
        if let Err(e) = logger.write_line(line) {
            eprintln!("⚠️  Failed to write log file: {}", e);
            *guard = None;
        }
    }
}

pub fn flush_file_logging() {
    if let Some(logger) = FILE_LOGGER.lock().as_mut() {
        let _ = logger.writer.flush();
    }
}
