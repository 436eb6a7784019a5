//! Solar system handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use mundosolar_entity::system::model::CreateSolarSystem;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;

/// GET /api/clients/:id/systems
pub async fn list_for_client(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(client_id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let systems = state
        .system_service
        .list_for_client(&auth, client_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": systems })))
}

/// POST /api/systems
pub async fn create_system(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<CreateSolarSystem>,
) -> HandlerResult<Json<serde_json::Value>> {
    let system = state.system_service.create(&auth, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": system })))
}

/// DELETE /api/systems/:id
pub async fn delete_system(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.system_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Solar system deleted".to_string(),
    })))
}
