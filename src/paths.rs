//! Filesystem locations used by the kiosk service
//!
//! Everything lives under one base directory, picked from the platform's
//! local data directory unless `--data-dir` overrides it:
//!
//! ```text
//! TizoKiosk/
//! ├── data/
//! │ ├── config.toml
//! │ └── tizo.db
//! └── logs/
//!   └── tizo_kiosk_<date>.log
//! ```

use once_cell::sync::OnceCell;
use std::path::PathBuf;

const APP_DIR: &str = "TizoKiosk";

static BASE_DIRECTORY: OnceCell<PathBuf> = OnceCell::new();

// =============================================================================
// BASE DIRECTORY
// =============================================================================

fn default_base_directory() -> PathBuf {
  dirs::data_local_dir()
    .or_else(dirs::data_dir)
    .or_else(dirs::home_dir)
    .map(|dir| dir.join(APP_DIR))
    .unwrap_or_else(|| PathBuf::from(APP_DIR))
}

/// Pin the base directory (from `--data-dir`)
///
/// Only the first call wins, and it has to happen before any accessor below
/// has resolved the default.
pub fn set_base_directory(path: PathBuf) -> Result<(), String> {
  BASE_DIRECTORY
    .set(path)
    .map_err(|rejected| format!("Base directory already fixed, ignoring {}", rejected.display()))
}

pub fn get_base_directory() -> PathBuf {
  BASE_DIRECTORY.get_or_init(default_base_directory).clone()
}

// =============================================================================
// LAYOUT
// =============================================================================

pub fn get_data_directory() -> PathBuf {
  get_base_directory().join("data")
}

pub fn get_logs_directory() -> PathBuf {
  get_base_directory().join("logs")
}

pub fn get_config_path() -> PathBuf {
  get_data_directory().join("config.toml")
}

/// Offers database used when `[database] path` is empty
pub fn get_offers_db_path() -> PathBuf {
  get_data_directory().join("tizo.db")
}

/// Create the base, data and logs directories if missing
///
/// Runs before the logger exists, so progress goes to stderr.
pub fn ensure_all_directories() -> Result<(), String> {
  for dir in [get_base_directory(), get_data_directory(), get_logs_directory()] {
    if dir.is_dir() {
      continue;
    }
    std::fs::create_dir_all(&dir)
      .map_err(|e| format!("Cannot create {}: {}", dir.display(), e))?;
    eprintln!("📁 Created {}", dir.display());
  }
  Ok(())
}
