//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Settings for the background job worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker runs inside this process.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum number of jobs executed concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: u16,
    /// Queue poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_concurrency() -> u16 {
    4
}

fn default_poll_interval() -> u64 {
    5
}
