//! Client CRUD workflows.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use mundosolar_auth::password::PasswordHasher;
use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_database::repositories::client::ClientRepository;
use mundosolar_entity::client::model::{CreateClient, UpdateClient};
use mundosolar_entity::client::Client;

use crate::context::StaffContext;

/// Manages client records and portal credentials.
#[derive(Debug, Clone)]
pub struct ClientService {
    client_repo: Arc<ClientRepository>,
    hasher: Arc<PasswordHasher>,
}

/// Input for creating a client, before credential hashing.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewClient {
    /// Business or personal name.
    pub name: String,
    /// Contact email; also the portal login.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Mexican tax id.
    pub rfc: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Plaintext portal password, when portal access is granted now.
    pub portal_password: Option<String>,
}

impl ClientService {
    /// Creates a new client service.
    pub fn new(client_repo: Arc<ClientRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self {
            client_repo,
            hasher,
        }
    }

    /// Lists clients with optional search.
    pub async fn list(
        &self,
        ctx: &StaffContext,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<PageResponse<Client>, AppError> {
        policy::authorize(ctx.role, Resource::Clients, Action::Read)?;
        self.client_repo.find_all(page, search).await
    }

    /// Fetches one client.
    pub async fn get(&self, ctx: &StaffContext, id: Uuid) -> Result<Client, AppError> {
        policy::authorize(ctx.role, Resource::Clients, Action::Read)?;
        self.client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    /// Creates a client, hashing the portal password when provided.
    pub async fn create(&self, ctx: &StaffContext, input: NewClient) -> Result<Client, AppError> {
        policy::authorize(ctx.role, Resource::Clients, Action::Write)?;

        if input.name.trim().is_empty() {
            return Err(AppError::validation("Client name is required"));
        }
        if !input.email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        if let Some(existing) = self.client_repo.find_by_email(&input.email).await? {
            return Err(AppError::conflict(format!(
                "A client with email '{}' already exists",
                existing.email
            )));
        }

        let portal_password_hash = match input.portal_password.as_deref() {
            Some(pw) if !pw.is_empty() => Some(self.hasher.hash_password(pw)?),
            _ => None,
        };

        let client = self
            .client_repo
            .create(&CreateClient {
                name: input.name,
                email: input.email,
                phone: input.phone,
                rfc: input.rfc,
                address: input.address,
                portal_password_hash,
            })
            .await?;

        info!(client_id = %client.id, actor = %ctx.user_id, "Client created");
        Ok(client)
    }

    /// Updates client fields.
    pub async fn update(
        &self,
        ctx: &StaffContext,
        id: Uuid,
        data: UpdateClient,
    ) -> Result<Client, AppError> {
        policy::authorize(ctx.role, Resource::Clients, Action::Write)?;

        if let Some(email) = data.email.as_deref() {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email format"));
            }
            if let Some(existing) = self.client_repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
        }

        self.client_repo
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    /// Sets or resets a client's portal password.
    pub async fn set_portal_password(
        &self,
        ctx: &StaffContext,
        id: Uuid,
        password: &str,
    ) -> Result<(), AppError> {
        policy::authorize(ctx.role, Resource::Clients, Action::Write)?;

        if password.len() < 8 {
            return Err(AppError::validation(
                "Portal password must be at least 8 characters",
            ));
        }

        let hash = self.hasher.hash_password(password)?;
        self.client_repo.update_portal_password(id, &hash).await?;
        info!(client_id = %id, actor = %ctx.user_id, "Portal password set");
        Ok(())
    }

    /// Deactivates a client.
    pub async fn deactivate(&self, ctx: &StaffContext, id: Uuid) -> Result<(), AppError> {
        policy::authorize(ctx.role, Resource::Clients, Action::Delete)?;
        self.get(ctx, id).await?;
        self.client_repo.set_active(id, false).await?;
        info!(client_id = %id, actor = %ctx.user_id, "Client deactivated");
        Ok(())
    }
}
