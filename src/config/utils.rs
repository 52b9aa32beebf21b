//! Configuration utilities - loading, reloading, and access helpers
//!
//! - Loading configuration from disk
//! - Hot-reloading configuration at runtime
//! - Thread-safe access helpers

use super::schemas::Config;
use crate::errors::{KioskError, KioskResult};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::Path;

/// Global configuration instance
///
/// Set once at startup by `load_config_from_path`; `reload_config` swaps
/// the whole value so readers never see a half-applied file.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Read and validate a config file; a missing file yields the defaults
pub fn read_config_file(path: &Path) -> KioskResult<Config> {
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KioskError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Config::from_toml_str(&contents).map_err(|e| {
            KioskError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?
    } else {
        eprintln!(
            "⚠️  Config file '{}' not found, using default values",
            path.display()
        );
        Config::default()
    };

    config.validate().map_err(KioskError::Config)?;
    Ok(config)
}

/// Load `config.toml` from the data directory and initialize the global CONFIG
pub fn load_config() -> KioskResult<()> {
    load_config_from_path(&crate::paths::get_config_path())
}

/// Load configuration from a file and initialize the global CONFIG
pub fn load_config_from_path(path: &Path) -> KioskResult<()> {
    let config = read_config_file(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| KioskError::Config("Config already initialized".to_string()))?;

    Ok(())
}

/// Reload configuration from disk
///
/// On error the current configuration stays in place.
pub fn reload_config(path: &Path) -> KioskResult<()> {
    let new_config = read_config_file(path)?;

    let lock = CONFIG
        .get()
        .ok_or_else(|| KioskError::Config("Config not initialized".to_string()))?;
    *lock.write() = new_config;

    Ok(())
}

/// Access the configuration through a closure without cloning it
///
/// Falls back to defaults if the config has not been loaded yet.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => f(&lock.read()),
        None => f(&Config::default()),
    }
}

/// Get a full copy of the current configuration
pub fn get_config_clone() -> Config {
    with_config(|config| config.clone())
}
