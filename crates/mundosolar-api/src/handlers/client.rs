//! Client record handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use mundosolar_entity::client::model::UpdateClient;
use mundosolar_service::client::service::NewClient;

use crate::dto::request::{ListQuery, SetPasswordRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;
use mundosolar_core::types::pagination::PageRequest;

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(query): Query<ListQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));
    let result = state
        .client_service
        .list(&auth, &page, query.search.as_deref())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/clients/:id
pub async fn get_client(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let client = state.client_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": client })))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<NewClient>,
) -> HandlerResult<Json<serde_json::Value>> {
    let client = state.client_service.create(&auth, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": client })))
}

/// PUT /api/clients/:id
pub async fn update_client(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClient>,
) -> HandlerResult<Json<serde_json::Value>> {
    let client = state.client_service.update(&auth, id, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": client })))
}

/// PUT /api/clients/:id/portal-password
pub async fn set_portal_password(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<SetPasswordRequest>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state
        .client_service
        .set_portal_password(&auth, id, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Portal password updated".to_string(),
    })))
}

/// DELETE /api/clients/:id
pub async fn deactivate_client(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.client_service.deactivate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Client deactivated".to_string(),
    })))
}
