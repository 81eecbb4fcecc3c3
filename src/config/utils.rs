/// Configuration utilities - loading and access helpers
///
/// - Loading configuration from a TOML file (defaults when absent)
/// - A process-wide slot for binaries that load once at startup
use super::schemas::Config;
use crate::errors::{ConfigurationError, SwapCacheError};
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::RwLock;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/swapcache.toml";

/// Parse a configuration file without touching the global slot
///
/// A missing file yields `Config::default()`.
pub fn read_config_from_path(path: impl AsRef<Path>) -> Result<Config, SwapCacheError> {
    let path = path.as_ref();
    if !path.exists() {
        logger::warning(
            LogTag::System,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        SwapCacheError::Configuration(ConfigurationError::FileUnreadable {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    })?;

    parse_config(&contents)
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> Result<Config, SwapCacheError> {
    toml::from_str::<Config>(contents).map_err(|e| {
        SwapCacheError::Configuration(ConfigurationError::InvalidConfig {
            field: "<toml>".to_string(),
            reason: e.to_string(),
        })
    })
}

/// Load configuration from a file and install it in the global slot
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<(), SwapCacheError> {
    let config = read_config_from_path(path)?;
    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| SwapCacheError::configuration_error("Config already initialized"))
}

/// Load configuration from `CONFIG_FILE_PATH`
pub fn load_config() -> Result<(), SwapCacheError> {
    load_config_from_path(CONFIG_FILE_PATH)
}

/// Run `f` against the global configuration, or the defaults if none was loaded
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => match lock.read() {
            Ok(cfg) => f(&cfg),
            Err(poisoned) => f(&poisoned.into_inner()),
        },
        None => f(&Config::default()),
    }
}

/// Get a clone of the entire configuration
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}
