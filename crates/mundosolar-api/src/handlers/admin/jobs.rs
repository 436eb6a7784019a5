//! Background job administration handlers, including the manual Growatt
//! refresh trigger.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_entity::job::status::JobPriority;
use mundosolar_worker::queue::JobCreateParams;

use crate::error::HandlerResult;
use crate::extractors::{AuthStaff, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(params): Query<PaginationParams>,
) -> HandlerResult<Json<serde_json::Value>> {
    policy::authorize(auth.role, Resource::Jobs, Action::Read)?;
    let result = state
        .job_repo
        .find_all(&params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/admin/jobs/stats
pub async fn queue_stats(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<serde_json::Value>> {
    policy::authorize(auth.role, Resource::Jobs, Action::Read)?;
    let stats = state.job_queue.stats().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": stats })))
}

/// GET /api/admin/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    policy::authorize(auth.role, Resource::Jobs, Action::Read)?;
    let job = state
        .job_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;
    Ok(Json(serde_json::json!({ "success": true, "data": job })))
}

/// POST /api/admin/jobs/growatt-refresh
///
/// Manual trigger for the periodic Growatt cache refresh.
pub async fn trigger_growatt_refresh(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<serde_json::Value>> {
    policy::authorize(auth.role, Resource::Jobs, Action::Write)?;

    let job = state
        .job_queue
        .enqueue(JobCreateParams {
            job_type: "growatt_refresh".to_string(),
            queue: "default".to_string(),
            priority: JobPriority::High,
            payload: serde_json::json!({ "task": "growatt_refresh", "manual": true }),
            max_attempts: 1,
            scheduled_at: None,
            created_by: Some(auth.user_id),
        })
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": job })))
}
