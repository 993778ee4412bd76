//! Transport configuration.

use crate::config::get_config;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Settings a transport is built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Maximum redirects to follow; `0` disables following.
    pub max_redirects: u32,

    /// Headers applied to requests that do not set them.
    pub default_headers: HashMap<String, String>,
}

impl TransportConfig {
    /// Creates a config with the given timeout, no redirects and no default headers.
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            max_redirects: 0,
            default_headers: HashMap::new(),
        }
    }

    /// Snapshot of the global configuration.
    pub fn from_global_config() -> Self {
        let global_config = get_config();
        Self {
            timeout_ms: global_config.timeout,
            max_redirects: if global_config.follow_redirects {
                global_config.max_redirects
            } else {
                0
            },
            default_headers: global_config.default_headers,
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TransportConfig {
    /// Reads the global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}
