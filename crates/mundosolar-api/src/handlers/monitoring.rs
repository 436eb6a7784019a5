//! Growatt monitoring handlers (staff side).

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::BulkMonitoringRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;

/// GET /api/monitoring/:client_id
pub async fn get_cached(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(client_id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let cached = state.monitoring_service.get_cached(&auth, client_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": cached })))
}

/// POST /api/monitoring/bulk
pub async fn get_bulk_cached(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<BulkMonitoringRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    let cached = state
        .monitoring_service
        .get_bulk_cached(&auth, &req.client_ids)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": cached })))
}

/// POST /api/monitoring/:client_id/invalidate
pub async fn invalidate(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(client_id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.monitoring_service.invalidate(&auth, client_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Cache invalidated".to_string(),
    })))
}
