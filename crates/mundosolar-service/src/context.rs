//! Request contexts carrying the authenticated actor.
//!
//! Two audiences, two contexts: staff requests carry a [`StaffContext`]
//! decoded from the staff JWT; portal requests carry a [`PortalContext`]
//! decoded from the client-portal token. Services take the one they need,
//! so a portal token can never reach a staff-only operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mundosolar_entity::user::UserRole;

/// Context for an authenticated staff request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffContext {
    /// The authenticated staff user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl StaffContext {
    /// Creates a new staff context.
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Context for an authenticated client-portal request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalContext {
    /// The authenticated client's ID.
    pub client_id: Uuid,
    /// When the portal token expires.
    pub token_expires_at: DateTime<Utc>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl PortalContext {
    /// Creates a new portal context.
    pub fn new(client_id: Uuid, token_expires_at: DateTime<Utc>) -> Self {
        Self {
            client_id,
            token_expires_at,
            request_time: Utc::now(),
        }
    }
}
