//! Client-portal handlers: login, profile, own orders, own systems,
//! maintenance requests, monitoring, and notifications.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use mundosolar_core::error::AppError;
use mundosolar_entity::maintenance::model::CreateRequest;

use crate::dto::request::{MaintenanceRequestBody, PortalLoginRequest};
use crate::dto::response::{ApiResponse, CountResponse, MessageResponse, PortalLoginResponse};
use crate::error::HandlerResult;
use crate::extractors::{AuthClient, PaginationParams};
use crate::state::AppState;

/// POST /api/portal/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<PortalLoginRequest>,
) -> HandlerResult<Json<ApiResponse<PortalLoginResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .auth_service
        .portal_login(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(PortalLoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        client: result.client.into(),
    })))
}

/// GET /api/portal/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthClient,
) -> HandlerResult<Json<serde_json::Value>> {
    let systems = state.system_service.list_own(&auth).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "client_id": auth.client_id, "systems": systems },
    })))
}

/// GET /api/portal/orders
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthClient,
    Query(params): Query<PaginationParams>,
) -> HandlerResult<Json<serde_json::Value>> {
    let result = state
        .order_service
        .list_own(&auth, &params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/portal/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthClient,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let detail = state.order_service.get_own(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": detail })))
}

/// POST /api/portal/maintenance
pub async fn create_maintenance_request(
    State(state): State<AppState>,
    auth: AuthClient,
    Json(req): Json<MaintenanceRequestBody>,
) -> HandlerResult<Json<serde_json::Value>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let record = state
        .maintenance_service
        .create_request(
            &auth,
            CreateRequest {
                maintenance_type: req.maintenance_type,
                title: req.title,
                description: req.description,
                preferred_date: req.preferred_date,
                solar_system_id: req.solar_system_id,
                priority: req.priority,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// GET /api/portal/maintenance
pub async fn list_maintenance(
    State(state): State<AppState>,
    auth: AuthClient,
    Query(params): Query<PaginationParams>,
) -> HandlerResult<Json<serde_json::Value>> {
    let result = state
        .maintenance_service
        .list_own(&auth, &params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/portal/maintenance/:id
pub async fn get_maintenance(
    State(state): State<AppState>,
    auth: AuthClient,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let record = state.maintenance_service.get_owned(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// POST /api/portal/maintenance/:id/cancel
pub async fn cancel_maintenance(
    State(state): State<AppState>,
    auth: AuthClient,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let record = state
        .maintenance_service
        .cancel_own(&auth, id, None)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// DELETE /api/portal/maintenance/:id
pub async fn delete_maintenance(
    State(state): State<AppState>,
    auth: AuthClient,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.maintenance_service.delete_own(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Maintenance record deleted".to_string(),
    })))
}

/// GET /api/portal/monitoring
pub async fn monitoring(
    State(state): State<AppState>,
    auth: AuthClient,
) -> HandlerResult<Json<serde_json::Value>> {
    let cached = state.monitoring_service.get_own(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": cached })))
}

/// GET /api/portal/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthClient,
    Query(params): Query<PaginationParams>,
) -> HandlerResult<Json<serde_json::Value>> {
    let result = state
        .notification_service
        .list_for_client(&auth, &params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/portal/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthClient,
) -> HandlerResult<Json<ApiResponse<CountResponse>>> {
    let count = state.notification_service.unread_count_client(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/portal/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    auth: AuthClient,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.notification_service.mark_read_client(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}
