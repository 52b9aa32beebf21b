//! Level and tag filtering in front of the formatter

use super::config::{get_logger_config, is_debug_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Whether a message at `level` for `tag` is shown
///
/// - errors always pass
/// - anything above the configured threshold is dropped
/// - debug needs `--debug-<tag>` (or global verbose)
/// - verbose needs `--verbose`, which the threshold check already covers
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    match level {
        LogLevel::Error => true,
        _ if level > config.min_level => false,
        LogLevel::Debug => is_debug_enabled_for_tag(tag),
        LogLevel::Info | LogLevel::Warning | LogLevel::Verbose => true,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if should_log(&tag, level) {
        super::format::format_and_log(&tag, level, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::{set_logger_config, LoggerConfig};

    #[test]
    fn test_filtering_by_level_and_tag() {
        // One test: the logger config is process-global
        let mut config = LoggerConfig::default();
        config.debug_tags.insert("rates".to_string());
        config.min_level = LogLevel::Debug;
        set_logger_config(config);

        assert!(should_log(&LogTag::Rates, LogLevel::Debug));
        assert!(!should_log(&LogTag::Offers, LogLevel::Debug));
        assert!(!should_log(&LogTag::Rates, LogLevel::Verbose));
        assert!(should_log(&LogTag::Offers, LogLevel::Info));

        let mut quiet = LoggerConfig::default();
        quiet.min_level = LogLevel::Warning;
        set_logger_config(quiet);

        assert!(!should_log(&LogTag::System, LogLevel::Info));
        assert!(should_log(&LogTag::System, LogLevel::Warning));
        assert!(should_log(&LogTag::System, LogLevel::Error));

        set_logger_config(LoggerConfig::default());
    }
}
