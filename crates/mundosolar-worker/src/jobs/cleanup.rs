//! Cache and notification cleanup job handlers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::info;

use mundosolar_database::repositories::growatt_cache::GrowattCacheRepository;
use mundosolar_database::repositories::notification::NotificationRepository;
use mundosolar_entity::job::model::Job;

use crate::executor::{JobExecutionError, JobHandler};

/// Deletes Growatt cache rows that are both expired and flagged stale.
#[derive(Debug)]
pub struct GrowattCacheCleanupHandler {
    cache_repo: Arc<GrowattCacheRepository>,
}

impl GrowattCacheCleanupHandler {
    /// Create a new cache cleanup handler.
    pub fn new(cache_repo: Arc<GrowattCacheRepository>) -> Self {
        Self { cache_repo }
    }
}

#[async_trait]
impl JobHandler for GrowattCacheCleanupHandler {
    fn job_type(&self) -> &str {
        "growatt_cache_cleanup"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let count = self
            .cache_repo
            .cleanup_expired(Utc::now())
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Cache cleanup failed: {e}")))?;

        info!(count, "Expired stale cache rows removed");
        Ok(Some(serde_json::json!({
            "task": "growatt_cache_cleanup",
            "rows_removed": count,
        })))
    }
}

/// Deletes notifications older than the retention window.
#[derive(Debug)]
pub struct NotificationCleanupHandler {
    notification_repo: Arc<NotificationRepository>,
    retention_days: i64,
}

impl NotificationCleanupHandler {
    /// Create a new notification cleanup handler.
    pub fn new(notification_repo: Arc<NotificationRepository>, retention_days: i64) -> Self {
        Self {
            notification_repo,
            retention_days,
        }
    }
}

#[async_trait]
impl JobHandler for NotificationCleanupHandler {
    fn job_type(&self) -> &str {
        "notification_cleanup"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let cutoff = Utc::now() - Duration::days(self.retention_days);
        let count = self
            .notification_repo
            .cleanup_old(cutoff)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Notification cleanup failed: {e}"))
            })?;

        info!(count, "Old notifications removed");
        Ok(Some(serde_json::json!({
            "task": "notification_cleanup",
            "notifications_removed": count,
            "retention_days": self.retention_days,
        })))
    }
}
