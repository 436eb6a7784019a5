//! Growatt vendor integration configuration.

use serde::{Deserialize, Serialize};

/// Settings for the Growatt monitoring API and its local data cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowattConfig {
    /// Whether the periodic refresh job is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base URL of the vendor API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Vendor account username.
    #[serde(default)]
    pub username: String,
    /// Vendor account password (hashed with the legacy scheme before sending).
    #[serde(default)]
    pub password: String,
    /// How long cached plant metrics stay fresh, in minutes.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_minutes: i64,
    /// Request timeout for vendor calls, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_api_base_url() -> String {
    "https://server.growatt.com".to_string()
}

fn default_cache_ttl() -> i64 {
    24 * 60
}

fn default_request_timeout() -> u64 {
    30
}
