//! Configuration system
//!
//! TOML file under the data directory, typed sections with embedded
//! defaults, and a process-wide handle for hot reloads.

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, DatabaseConfig, RatesConfig, WebserverConfig};
pub use utils::{
    get_config_clone, load_config, load_config_from_path, read_config_file, reload_config,
    with_config,
};
