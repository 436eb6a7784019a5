//! Staff user administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use mundosolar_entity::user::UserRole;
use mundosolar_service::user::service::NewUser;

use crate::dto::request::{ChangeRoleRequest, SetPasswordRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::HandlerResult;
use crate::extractors::{AuthStaff, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(params): Query<PaginationParams>,
) -> HandlerResult<Json<serde_json::Value>> {
    let result = state
        .user_service
        .list(&auth, &params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<NewUser>,
) -> HandlerResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.create(&auth, req).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/admin/users/:id/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> HandlerResult<Json<ApiResponse<UserResponse>>> {
    let role: UserRole = req.role.parse()?;
    let user = state.user_service.change_role(&auth, id, role).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/admin/users/:id/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<SetPasswordRequest>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state
        .user_service
        .reset_password(&auth, id, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password reset".to_string(),
    })))
}

/// DELETE /api/admin/users/:id
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.user_service.deactivate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "User deactivated".to_string(),
    })))
}
