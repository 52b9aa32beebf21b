//! Command-line arguments for the kiosk service
//!
//! Runtime options are parsed with clap. The `--debug-<tag>`, `--verbose`
//! and `--quiet` flags are declared here so clap accepts them; the logger
//! reads them straight from the process arguments.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tizo-kiosk", version, about = "TIZO kiosk top-up rate service")]
pub struct Arguments {
    /// Config file (default: <data dir>/data/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base directory for data and logs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override [webserver] host
    #[arg(long)]
    pub host: Option<String>,

    /// Override [webserver] port
    #[arg(long)]
    pub port: Option<u16>,

    /// Seed default offers into an empty table even if seed_if_empty is off
    #[arg(long)]
    pub seed: bool,

    /// Print the quote for an amount and exit
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub quote: Option<String>,

    /// Show verbose logs for every tag
    #[arg(long)]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long)]
    pub quiet: bool,

    #[arg(long = "debug-system", hide = true)]
    pub debug_system: bool,

    #[arg(long = "debug-config", hide = true)]
    pub debug_config: bool,

    #[arg(long = "debug-database", hide = true)]
    pub debug_database: bool,

    #[arg(long = "debug-rates", hide = true)]
    pub debug_rates: bool,

    #[arg(long = "debug-converter", hide = true)]
    pub debug_converter: bool,

    #[arg(long = "debug-offers", hide = true)]
    pub debug_offers: bool,

    #[arg(long = "debug-webserver", hide = true)]
    pub debug_webserver: bool,
}

impl Arguments {
    /// Config file path, falling back to the data directory default
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::paths::get_config_path)
    }

    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.webserver.host = host.clone();
        }
        if let Some(port) = self.port {
            config.webserver.port = port;
        }
        if self.seed {
            config.rates.seed_if_empty = true;
        }
    }

    /// Tags with a `--debug-<tag>` flag set, for the startup banner
    pub fn debug_tags(&self) -> Vec<&'static str> {
        [
            (self.debug_system, "system"),
            (self.debug_config, "config"),
            (self.debug_database, "database"),
            (self.debug_rates, "rates"),
            (self.debug_converter, "converter"),
            (self.debug_offers, "offers"),
            (self.debug_webserver, "webserver"),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, tag)| tag)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{LogTag, LoggerConfig};

    #[test]
    fn test_overrides_applied() {
        let args =
            Arguments::try_parse_from(["tizo-kiosk", "--port", "9000", "--host", "0.0.0.0"])
                .unwrap();
        let mut config = Config::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.webserver.port, 9000);
        assert_eq!(config.webserver.host, "0.0.0.0");
    }

    #[test]
    fn test_debug_flags_accepted() {
        let args =
            Arguments::try_parse_from(["tizo-kiosk", "--debug-rates", "--debug-converter"])
                .unwrap();
        assert_eq!(args.debug_tags(), vec!["rates", "converter"]);
    }

    #[test]
    fn test_logger_switches_are_declared() {
        // Everything the logger reads from argv must also get past clap
        let argv = ["tizo-kiosk", "--verbose", "--quiet"]
            .into_iter()
            .map(String::from)
            .chain(
                [
                    LogTag::System,
                    LogTag::Config,
                    LogTag::Database,
                    LogTag::Rates,
                    LogTag::Converter,
                    LogTag::Offers,
                    LogTag::Webserver,
                ]
                .iter()
                .map(|tag| format!("--debug-{}", tag.to_debug_key())),
            )
            .collect::<Vec<_>>();

        assert!(Arguments::try_parse_from(&argv).is_ok());
        let logger = LoggerConfig::from_args(&argv);
        assert_eq!(logger.debug_tags.len(), 7);
    }

    #[test]
    fn test_undeclared_logger_switch_rejected() {
        assert!(Arguments::try_parse_from(["tizo-kiosk", "--verbose-converter"]).is_err());
    }

    #[test]
    fn test_negative_quote_reaches_validation() {
        let args = Arguments::try_parse_from(["tizo-kiosk", "--quote", "-50"]).unwrap();
        assert_eq!(args.quote.as_deref(), Some("-50"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Arguments::try_parse_from(["tizo-kiosk", "--port", "99999"]).is_err());
    }
}
