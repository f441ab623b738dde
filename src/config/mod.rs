//! Configuration management for search sessions.
//!
//! This module provides configuration loading, validation, and access through a singleton pattern.
//! Configuration is read from a settings object under the "search-session" key and merged with defaults.

pub mod error;
pub mod schema;

pub use error::ConfigError;
pub use schema::{SessionConfig, MAX_TOP_K};

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Key under which search-session settings live in a settings object.
pub const SETTINGS_KEY: &str = "search-session";

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<SessionConfig>> = Lazy::new(|| RwLock::new(SessionConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// Reads the "search-session" settings, merges them with defaults, validates
/// the result, and updates the global configuration. Settings that fail to
/// deserialize are ignored with a warning and defaults are used instead.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing user settings under the "search-session" key
///
/// # Returns
///
/// `Ok(SessionConfig)` with the loaded configuration, or `Err` if validation fails.
///
/// # Example
///
/// ```no_run
/// use search_session::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "search-session": {
///         "baseUrl": "http://localhost:8000",
///         "topK": 10
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.top_k, 10);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<SessionConfig, ConfigError> {
    let mut config = SessionConfig::default();

    if let Some(settings) = settings_json {
        if let Some(session_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<SessionConfig>(session_settings.clone()) {
                Ok(user_config) => {
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY, e
                    );
                }
            }
        }
    }

    config.validate()?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone of the current configuration, or the defaults if nothing
/// has been loaded yet.
pub fn get_config() -> SessionConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| SessionConfig::default())
}

/// Updates the global configuration in place.
///
/// If the update leaves the configuration invalid, it is reverted to defaults.
///
/// # Example
///
/// ```no_run
/// use search_session::config::update_config;
///
/// update_config(|config| {
///     config.history_limit = 20;
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut SessionConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            warn!("Configuration update rejected: {}. Reverting to defaults.", e);
            *config = SessionConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = SessionConfig::default();
    }
}
