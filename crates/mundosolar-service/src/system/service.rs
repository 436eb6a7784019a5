//! Solar system registration workflows.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_database::repositories::client::ClientRepository;
use mundosolar_database::repositories::system::SolarSystemRepository;
use mundosolar_entity::system::model::CreateSolarSystem;
use mundosolar_entity::system::SolarSystem;

use crate::context::{PortalContext, StaffContext};

/// Manages installed solar system records.
#[derive(Debug, Clone)]
pub struct SolarSystemService {
    system_repo: Arc<SolarSystemRepository>,
    client_repo: Arc<ClientRepository>,
}

impl SolarSystemService {
    /// Creates a new solar system service.
    pub fn new(
        system_repo: Arc<SolarSystemRepository>,
        client_repo: Arc<ClientRepository>,
    ) -> Self {
        Self {
            system_repo,
            client_repo,
        }
    }

    /// Lists a client's systems (staff view).
    pub async fn list_for_client(
        &self,
        ctx: &StaffContext,
        client_id: Uuid,
    ) -> Result<Vec<SolarSystem>, AppError> {
        policy::authorize(ctx.role, Resource::SolarSystems, Action::Read)?;
        self.system_repo.find_by_client(client_id).await
    }

    /// Lists the portal client's own systems.
    pub async fn list_own(&self, ctx: &PortalContext) -> Result<Vec<SolarSystem>, AppError> {
        self.system_repo.find_by_client(ctx.client_id).await
    }

    /// Registers a system for a client.
    pub async fn create(
        &self,
        ctx: &StaffContext,
        data: CreateSolarSystem,
    ) -> Result<SolarSystem, AppError> {
        policy::authorize(ctx.role, Resource::SolarSystems, Action::Write)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("System name is required"));
        }
        if data.panel_count <= 0 {
            return Err(AppError::validation("Panel count must be positive"));
        }
        self.client_repo
            .find_by_id(data.client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        let system = self.system_repo.create(&data).await?;
        info!(system_id = %system.id, actor = %ctx.user_id, "Solar system registered");
        Ok(system)
    }

    /// Deletes a system.
    pub async fn delete(&self, ctx: &StaffContext, id: Uuid) -> Result<(), AppError> {
        policy::authorize(ctx.role, Resource::SolarSystems, Action::Delete)?;
        if !self.system_repo.delete(id).await? {
            return Err(AppError::not_found("Solar system not found"));
        }
        info!(system_id = %id, actor = %ctx.user_id, "Solar system deleted");
        Ok(())
    }
}
