//! Job queue abstraction for enqueuing and dequeuing background jobs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use mundosolar_core::error::AppError;
use mundosolar_database::repositories::job::JobRepository;
use mundosolar_entity::job::model::{CreateJob, Job};
use mundosolar_entity::job::status::{JobPriority, JobStatus};

/// Parameters for creating a new job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreateParams {
    /// Type of job (e.g. `"growatt_refresh"`).
    pub job_type: String,
    /// Queue name (`"default"` or `"maintenance"`).
    pub queue: String,
    /// Priority level.
    pub priority: JobPriority,
    /// Job payload as JSON.
    pub payload: serde_json::Value,
    /// Maximum retry attempts.
    pub max_attempts: i32,
    /// Optional scheduled time (run after this time).
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Staff member who triggered the job, for manual triggers.
    pub created_by: Option<Uuid>,
}

/// Job queue for enqueuing and dequeuing work.
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job repository for database persistence.
    repo: Arc<JobRepository>,
    /// Worker identifier for claiming jobs.
    worker_id: String,
}

impl JobQueue {
    /// Create a new job queue.
    pub fn new(repo: Arc<JobRepository>, worker_id: String) -> Self {
        Self { repo, worker_id }
    }

    /// Enqueue a new job.
    pub async fn enqueue(&self, params: JobCreateParams) -> Result<Job, AppError> {
        let job = self
            .repo
            .create(&CreateJob {
                job_type: params.job_type,
                queue: params.queue,
                priority: params.priority,
                payload: params.payload,
                max_attempts: params.max_attempts,
                scheduled_at: params.scheduled_at,
                created_by: params.created_by,
            })
            .await?;

        debug!(
            job_id = %job.id,
            job_type = %job.job_type,
            queue = %job.queue,
            "Enqueued job"
        );
        Ok(job)
    }

    /// Dequeue the next available job from the given queues, in order.
    pub async fn dequeue(&self, queues: &[&str]) -> Result<Option<Job>, AppError> {
        for queue in queues {
            let job = self.repo.claim_next(queue, &self.worker_id).await?;
            if let Some(job) = job {
                debug!(job_id = %job.id, job_type = %job.job_type, "Dequeued job");
                return Ok(Some(job));
            }
        }
        Ok(None)
    }

    /// Mark a job as completed successfully.
    pub async fn complete(
        &self,
        job_id: Uuid,
        result: Option<serde_json::Value>,
    ) -> Result<(), AppError> {
        self.repo.mark_completed(job_id, result.as_ref()).await
    }

    /// Mark a job as failed.
    pub async fn fail(&self, job_id: Uuid, error: &str) -> Result<(), AppError> {
        self.repo.mark_failed(job_id, error).await
    }

    /// Reset a failed job to pending for retry.
    pub async fn retry(&self, job_id: Uuid) -> Result<(), AppError> {
        self.repo.retry(job_id).await
    }

    /// Queue statistics for the admin jobs endpoint.
    pub async fn stats(&self) -> Result<QueueStats, AppError> {
        Ok(QueueStats {
            pending: self.repo.count_by_status(JobStatus::Pending).await?,
            running: self.repo.count_by_status(JobStatus::Running).await?,
            failed: self.repo.count_by_status(JobStatus::Failed).await?,
            worker_id: self.worker_id.clone(),
        })
    }
}

/// Queue statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStats {
    /// Number of pending jobs.
    pub pending: i64,
    /// Number of running jobs.
    pub running: i64,
    /// Number of failed jobs.
    pub failed: i64,
    /// Current worker identifier.
    pub worker_id: String,
}
