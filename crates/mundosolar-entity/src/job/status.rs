//! Background job status and priority enums.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Waiting to be picked up.
    Pending,
    /// Claimed by a worker.
    Running,
    /// Finished successfully.
    Completed,
    /// Failed after exhausting retries.
    Failed,
    /// Cancelled before execution.
    Cancelled,
}

impl JobStatus {
    /// Whether a job in this state may be reset to pending.
    pub fn can_retry(&self) -> bool {
        matches!(self, Self::Failed | Self::Running)
    }
}

/// Priority used when ordering the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobPriority {
    /// Run before everything else.
    High,
    /// Default priority.
    Normal,
    /// Run when nothing else is waiting.
    Low,
}
