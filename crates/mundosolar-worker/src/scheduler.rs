//! Cron scheduler for periodic background tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use mundosolar_core::error::AppError;
use mundosolar_entity::job::status::JobPriority;

use crate::queue::{JobCreateParams, JobQueue};

/// Cron-based scheduler that enqueues periodic work into the job queue.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Job queue for enqueuing scheduled work.
    queue: Arc<JobQueue>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(queue: Arc<JobQueue>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;
        Ok(Self { scheduler, queue })
    }

    /// Register all default scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        // Growatt refresh — every 30 minutes.
        self.register(
            "growatt_refresh",
            "0 */30 * * * *",
            "default",
            JobPriority::Normal,
            3,
        )
        .await?;

        // Expired-and-stale cache rows — daily at 3 AM.
        self.register(
            "growatt_cache_cleanup",
            "0 0 3 * * *",
            "maintenance",
            JobPriority::Low,
            1,
        )
        .await?;

        // Old notifications — daily at 2 AM.
        self.register(
            "notification_cleanup",
            "0 0 2 * * *",
            "maintenance",
            JobPriority::Low,
            1,
        )
        .await?;

        info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;
        info!("Cron scheduler started");
        Ok(())
    }

    /// Shut down the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;
        info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register(
        &self,
        job_type: &'static str,
        cron: &str,
        queue_name: &'static str,
        priority: JobPriority,
        max_attempts: i32,
    ) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async(cron, move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            Box::pin(async move {
                let params = JobCreateParams {
                    job_type: job_type.to_string(),
                    queue: queue_name.to_string(),
                    priority,
                    payload: serde_json::json!({ "task": job_type }),
                    max_attempts,
                    scheduled_at: None,
                    created_by: None,
                };
                if let Err(e) = queue.enqueue(params).await {
                    error!(job_type, error = %e, "Failed to enqueue scheduled job");
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create {job_type} schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {job_type} schedule: {e}")))?;

        info!(job_type, cron, "Registered scheduled task");
        Ok(())
    }
}
