//! Climate API Core Library
//!
//! Shared utilities for the climate service:
//! - Configuration loading (XDG-compliant)
//! - File system checks for the dataset
//! - Common constants

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::is_readable_file;

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Environment variable holding an explicit config file path
pub const CONFIG_ENV_VAR: &str = "CLIMATE_API_CONFIG";

/// Config filename searched for in the standard locations
pub const CONFIG_FILE_NAME: &str = "climate.toml";

/// Default API port
pub const DEFAULT_PORT: u16 = 9900;

/// Default location of the pre-populated SQLite dataset
pub const DEFAULT_DATABASE: &str = "./Resources/hawaii.sqlite";

/// Default size of the read-only connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
