//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token issuance settings for staff and client-portal authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing JWTs.
    pub jwt_secret: String,
    /// Staff access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Staff refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Client-portal token TTL in hours.
    #[serde(default = "default_portal_ttl")]
    pub portal_token_ttl_hours: u64,
}

fn default_access_ttl() -> u64 {
    30
}

fn default_refresh_ttl() -> u64 {
    72
}

fn default_portal_ttl() -> u64 {
    24
}
