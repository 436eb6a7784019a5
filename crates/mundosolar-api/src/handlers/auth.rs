//! Staff authentication handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use mundosolar_core::error::AppError;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> HandlerResult<Json<ApiResponse<LoginResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .auth_service
        .staff_login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
        access_expires_at: result.tokens.access_expires_at,
        refresh_expires_at: result.tokens.refresh_expires_at,
        user: result.user.into(),
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> HandlerResult<Json<ApiResponse<LoginResponse>>> {
    let result = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
        access_expires_at: result.tokens.access_expires_at,
        refresh_expires_at: result.tokens.refresh_expires_at,
        user: result.user.into(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/auth/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<ChangePasswordRequest>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .user_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed".to_string(),
    })))
}
