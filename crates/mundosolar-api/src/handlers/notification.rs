//! Staff notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::HandlerResult;
use crate::extractors::{AuthStaff, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(params): Query<PaginationParams>,
) -> HandlerResult<Json<serde_json::Value>> {
    let result = state
        .notification_service
        .list_for_staff(&auth, &params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<ApiResponse<CountResponse>>> {
    let count = state.notification_service.unread_count_staff(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.notification_service.mark_read_staff(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<serde_json::Value>> {
    let count = state.notification_service.mark_all_read_staff(&auth).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "marked": count } }),
    ))
}
