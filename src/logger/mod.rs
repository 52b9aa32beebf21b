//! Tagged console + file logger
//!
//! Every message carries a `LogTag` naming the subsystem and a `LogLevel`.
//! Info and above print by default; debug output is opt-in per tag.
//!
//! ```rust,no_run
//! use tizo_kiosk::logger::{self, LogTag};
//!
//! logger::init();
//! logger::info(LogTag::Rates, "Loaded 9 tiers");
//! logger::warning(LogTag::Rates, "Reload failed, serving stale tiers");
//! logger::debug(LogTag::Converter, "1790 Rb -> 3460 Tizo"); // --debug-converter
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Read logging flags from the process arguments and open the log file
///
/// The logs directory must exist (see `paths::ensure_all_directories`).
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Shown only with `--debug-<tag>` or `--verbose`
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Shown only with `--verbose`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush buffered file output; call before the process exits
pub fn flush() {
    file::flush_file_logging();
}
