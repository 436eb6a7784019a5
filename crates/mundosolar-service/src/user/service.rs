//! Staff user administration and self-service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use mundosolar_auth::password::PasswordHasher;
use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_database::repositories::user::UserRepository;
use mundosolar_entity::user::model::{CreateUser, UpdateUser};
use mundosolar_entity::user::{User, UserRole};

use crate::context::StaffContext;

/// Input for creating a staff user, before credential hashing.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Full name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Manages staff accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    /// Lists staff users.
    pub async fn list(
        &self,
        ctx: &StaffContext,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        policy::authorize(ctx.role, Resource::Users, Action::Read)?;
        self.user_repo.find_all(page).await
    }

    /// Lists the active technician roster.
    pub async fn technicians(&self, ctx: &StaffContext) -> Result<Vec<User>, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Read)?;
        self.user_repo.find_active_by_role(UserRole::Technician).await
    }

    /// Creates a staff user (admin only).
    pub async fn create(&self, ctx: &StaffContext, input: NewUser) -> Result<User, AppError> {
        policy::authorize(ctx.role, Resource::Users, Action::Write)?;

        if input.username.len() < 3 {
            return Err(AppError::validation(
                "Username must be at least 3 characters",
            ));
        }
        if input.password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }
        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username is already taken"));
        }
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email is already in use"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                full_name: input.full_name,
                role: input.role,
            })
            .await?;

        info!(user_id = %user.id, actor = %ctx.user_id, "Staff user created");
        Ok(user)
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &StaffContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &StaffContext,
        data: UpdateUser,
    ) -> Result<User, AppError> {
        if let Some(email) = data.email.as_deref() {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email format"));
            }
            if let Some(existing) = self.user_repo.find_by_email(email).await? {
                if existing.id != ctx.user_id {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
        }

        self.user_repo
            .update(ctx.user_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Changes the current user's password.
    pub async fn change_password(
        &self,
        ctx: &StaffContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        let valid = self
            .hasher
            .verify_password(current_password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }
        if new_password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(ctx.user_id, &new_hash).await?;
        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }

    /// Changes another user's role (admin only).
    pub async fn change_role(
        &self,
        ctx: &StaffContext,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, AppError> {
        policy::authorize(ctx.role, Resource::Users, Action::Write)?;

        if user_id == ctx.user_id {
            return Err(AppError::validation("Cannot change your own role"));
        }

        let user = self
            .user_repo
            .update_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user_id, role = %role, actor = %ctx.user_id, "Role changed");
        Ok(user)
    }

    /// Resets another user's password (admin only).
    pub async fn reset_password(
        &self,
        ctx: &StaffContext,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        policy::authorize(ctx.role, Resource::Users, Action::Write)?;

        if new_password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }
        let hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user_id, &hash).await?;
        info!(user_id = %user_id, actor = %ctx.user_id, "Password reset");
        Ok(())
    }

    /// Deactivates a user (admin only).
    pub async fn deactivate(&self, ctx: &StaffContext, user_id: Uuid) -> Result<(), AppError> {
        policy::authorize(ctx.role, Resource::Users, Action::Delete)?;

        if user_id == ctx.user_id {
            return Err(AppError::validation("Cannot deactivate your own account"));
        }
        self.user_repo.set_active(user_id, false).await?;
        info!(user_id = %user_id, actor = %ctx.user_id, "User deactivated");
        Ok(())
    }
}
