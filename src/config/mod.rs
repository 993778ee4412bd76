//! Configuration management.
//!
//! Configuration is loaded from a JSON settings document under the
//! `"beekeeper"` key, layered over the defaults, validated, and kept in a
//! process-wide singleton that transports read when they are built.

pub mod schema;

pub use schema::ClientConfig;

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Key under which settings are looked up.
pub const SETTINGS_KEY: &str = "beekeeper";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<ClientConfig>> = Lazy::new(|| RwLock::new(ClientConfig::default()));

/// Loads configuration from a settings document.
///
/// Settings that fail to deserialize are reported and ignored in favour of the
/// defaults; settings that deserialize but fail validation are an error and
/// leave the global configuration untouched.
///
/// # Example
///
/// ```
/// use beekeeper::config::load_config;
/// use serde_json::json;
///
/// let config = load_config(Some(json!({
///     "beekeeper": { "timeout": 60000 }
/// })))
/// .unwrap();
/// assert_eq!(config.timeout, 60000);
/// # beekeeper::config::reset_config();
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ClientConfig, String> {
    let mut config = ClientConfig::default();

    if let Some(settings) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<ClientConfig>(settings.clone()) {
            Ok(user_config) => config = user_config,
            Err(e) => {
                warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY, e
                );
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets a copy of the current global configuration.
///
/// Returns the defaults if nothing has been loaded.
pub fn get_config() -> ClientConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| ClientConfig::default())
}

/// Updates the global configuration in place.
///
/// If the result fails validation the configuration reverts to the defaults.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut ClientConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            warn!("Configuration validation failed after update: {}", e);
            *config = ClientConfig::default();
        }
    }
}

/// Resets the global configuration to the defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = ClientConfig::default();
    }
}
