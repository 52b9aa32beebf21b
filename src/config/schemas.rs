//! Configuration schemas - all config structures defined once with defaults
//!
//! Each struct is defined using the config_struct! macro which provides
//! embedded defaults and serde support, so `config.toml` only has to list
//! the values it changes.

use crate::config_struct;

// ============================================================================
// WEBSERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// HTTP API bind settings
    pub struct WebserverConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8080,
    }
}

// ============================================================================
// DATABASE CONFIGURATION
// ============================================================================

config_struct! {
    /// Offers database settings
    pub struct DatabaseConfig {
        /// Empty means `<data dir>/tizo.db`
        path: String = String::new(),

        /// How long SQLite waits on a locked database before failing
        busy_timeout_ms: u64 = 5000,
    }
}

// ============================================================================
// RATES CONFIGURATION
// ============================================================================

config_struct! {
    /// Rate cache and custom-quote settings
    pub struct RatesConfig {
        /// Periodic reload of the rate cache (0 disables the refresh task)
        refresh_interval_secs: u64 = 300,

        /// Upper bound for one load() against the offers table
        load_timeout_secs: u64 = 10,

        /// Insert the default tier list when the offers table is empty
        seed_if_empty: bool = true,

        /// Number of upsell suggestions attached to a custom quote
        upsell_count: usize = 2,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration, one section per subsystem
    pub struct Config {
        webserver: WebserverConfig = WebserverConfig::default(),
        database: DatabaseConfig = DatabaseConfig::default(),
        rates: RatesConfig = RatesConfig::default(),
    }
}

impl Config {
    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.webserver.host.trim().is_empty() {
            return Err("webserver.host must not be empty".to_string());
        }
        if self.rates.load_timeout_secs == 0 {
            return Err("rates.load_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.webserver.port, 8080);
        assert_eq!(config.rates.refresh_interval_secs, 300);
        assert_eq!(config.rates.upsell_count, 2);
        assert!(config.database.path.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [webserver]
            port = 9090

            [rates]
            refresh_interval_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.webserver.port, 9090);
        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.rates.refresh_interval_secs, 60);
        assert_eq!(config.rates.load_timeout_secs, 10);
        assert_eq!(config.database.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_zero_load_timeout_rejected() {
        let mut config = Config::default();
        config.rates.load_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        assert!(Config::from_toml_str("[webserver]\nport = \"eighty\"").is_err());
    }
}
