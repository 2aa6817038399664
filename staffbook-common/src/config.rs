//! Configuration loading and database location resolution
//!
//! Settings are resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 arrive already merged by the binary's argument parser and are
//! passed in as [`Overrides`]. A config file that cannot be read is reported
//! by the caller and replaced by [`TomlConfig::default`]; it never stops startup.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5080;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path (or `sqlite://` URL) of the database file
    #[serde(default)]
    pub database: Option<String>,

    /// Bind host
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP port
    #[serde(default)]
    pub port: Option<u16>,

    /// Use an in-memory database
    #[serde(default)]
    pub testing: Option<bool>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub testing: bool,
}

/// Where the service keeps its records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// SQLite file on disk
    File(PathBuf),
    /// Throwaway in-memory database (test mode)
    Memory,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseLocation,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Settings {
    /// Merge overrides, TOML values and compiled defaults
    pub fn resolve(overrides: &Overrides, toml_config: &TomlConfig) -> Self {
        let testing = overrides.testing || toml_config.testing.unwrap_or(false);

        let database = if testing {
            DatabaseLocation::Memory
        } else if let Some(location) = &overrides.database {
            DatabaseLocation::File(database_path_from_url(location))
        } else if let Some(location) = &toml_config.database {
            DatabaseLocation::File(database_path_from_url(location))
        } else {
            DatabaseLocation::File(default_database_path())
        };

        Self {
            database,
            host: overrides
                .host
                .clone()
                .or_else(|| toml_config.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml_config.port).unwrap_or(DEFAULT_PORT),
            log_level: toml_config.logging.level.clone(),
        }
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accept either a plain path or a `sqlite://` URL and return the file path
pub fn database_path_from_url(location: &str) -> PathBuf {
    let trimmed = location
        .strip_prefix("sqlite://")
        .or_else(|| location.strip_prefix("sqlite:"))
        .unwrap_or(location);
    // Drop connection parameters such as `?mode=rwc`
    let path = trimmed.split('?').next().unwrap_or(trimmed);
    PathBuf::from(path)
}

/// OS-dependent default database file
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("staffbook"))
        .unwrap_or_else(|| PathBuf::from("./staffbook_data"))
        .join("staffbook.db")
}

/// Per-user config file location, if the platform has one
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("staffbook").join("config.toml"))
}

/// Parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed for {}: {}", path.display(), e)))
}

/// Pick the config file to read, if any
///
/// An explicit path is always returned (so a typo surfaces as a read error);
/// otherwise the per-user file is used only when it exists.
pub fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|path| path.exists()),
    }
}
