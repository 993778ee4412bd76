//! Configuration schema for beekeeper.
//!
//! This module defines the configuration structure and validation logic for
//! the transport-level settings a caller can tune.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure.
///
/// Read from the `"beekeeper"` key of a settings document. Missing settings
/// fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Request timeout in milliseconds.
    ///
    /// Maximum time to wait for a complete response. Defaults to 30000ms.
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow when `follow_redirects` is set.
    /// Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Log every rendered request before it is sent. Defaults to false.
    #[serde(default)]
    pub verbose: bool,

    /// Headers added to every request that does not already set them.
    ///
    /// Defaults to a `User-Agent` header only.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            verbose: false,
            default_headers: default_headers(),
        }
    }
}

impl ClientConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if let Some(name) = self.default_headers.keys().find(|k| k.trim().is_empty()) {
            return Err(format!("defaultHeaders contains an empty header name: {:?}", name));
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("beekeeper/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
