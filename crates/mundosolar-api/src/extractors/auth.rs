//! Auth extractors for the two token audiences.
//!
//! `AuthStaff` pulls the staff JWT from the Authorization header;
//! `AuthClient` pulls the client-portal token. Each rejects the other
//! audience's tokens, so a portal token can never reach a staff handler.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use mundosolar_core::error::AppError;
use mundosolar_service::context::{PortalContext, StaffContext};

use crate::error::AppErrorResponse;
use crate::state::AppState;

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

/// Extracted authenticated staff context.
#[derive(Debug, Clone)]
pub struct AuthStaff(pub StaffContext);

impl std::ops::Deref for AuthStaff {
    type Target = StaffContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthStaff {
    type Rejection = AppErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.jwt_decoder.decode_access_token(token)?;
        Ok(AuthStaff(StaffContext::new(
            claims.user_id(),
            claims.role,
            claims.username,
        )))
    }
}

/// Extracted authenticated portal-client context.
#[derive(Debug, Clone)]
pub struct AuthClient(pub PortalContext);

impl std::ops::Deref for AuthClient {
    type Target = PortalContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthClient {
    type Rejection = AppErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.portal_codec.decode(token)?;
        Ok(AuthClient(PortalContext::new(
            claims.client_id(),
            claims.expires_at(),
        )))
    }
}
