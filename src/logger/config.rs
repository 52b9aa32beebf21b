//! Logger configuration and per-tag debug switches
//!
//! The configuration is a process-wide value set once at startup from the
//! command-line arguments and read on every log call.

use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped (Debug/Verbose have extra gates)
    pub min_level: LogLevel,

    /// Tags with `--debug-<tag>` enabled
    pub debug_tags: HashSet<String>,

    /// Mirror console output to the daily log file
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            file_logging: true,
        }
    }
}

impl LoggerConfig {
    /// Build a configuration from raw command-line arguments
    ///
    /// Recognizes `--verbose`, `--quiet` and `--debug-<tag>`; anything else
    /// is left to clap.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = LoggerConfig::default();

        for arg in args {
            if arg == "--verbose" {
                config.min_level = LogLevel::Verbose;
            } else if arg == "--quiet" {
                config.min_level = LogLevel::Warning;
            } else if let Some(tag) = arg.strip_prefix("--debug-") {
                config.debug_tags.insert(tag.to_lowercase());
                if config.min_level < LogLevel::Debug {
                    config.min_level = LogLevel::Debug;
                }
            }
        }

        config
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Initialize from the process arguments
pub fn init_from_args() {
    let args: Vec<String> = std::env::args().collect();
    set_logger_config(LoggerConfig::from_args(&args));
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = LOGGER_CONFIG.read();
    config.min_level == LogLevel::Verbose || config.debug_tags.contains(&tag.to_debug_key())
}
