//! Staff user entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A staff member of the installation company (administrator, office
/// manager, or field technician).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Full display name.
    pub full_name: String,
    /// Role (RBAC).
    pub role: UserRole,
    /// Whether the account is active.
    pub is_active: bool,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the user can currently authenticate.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new staff user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New email address.
    pub email: Option<String>,
    /// New full name.
    pub full_name: Option<String>,
}
