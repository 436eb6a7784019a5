//! Maintenance workflow: request intake, direct scheduling, status
//! transitions with history, and client-scoped deletion.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_database::repositories::maintenance::{
    HistoryActor, MaintenanceFilter, MaintenanceRepository,
};
use mundosolar_database::repositories::user::UserRepository;
use mundosolar_entity::maintenance::model::{CreateRequest, CreateScheduled};
use mundosolar_entity::maintenance::{
    MaintenancePriority, MaintenanceRecord, MaintenanceStatus, StatusHistoryEntry,
    TechnicianAssignment,
};
use mundosolar_entity::user::UserRole;

use crate::context::{PortalContext, StaffContext};
use crate::notification::NotificationService;

/// Client-facing message for each status a record can move to.
fn status_message(status: MaintenanceStatus) -> &'static str {
    match status {
        MaintenanceStatus::PendingApproval => "Su solicitud de mantenimiento fue recibida",
        MaintenanceStatus::Scheduled => "Su mantenimiento fue agendado",
        MaintenanceStatus::InProgress => "El técnico está trabajando en su instalación",
        MaintenanceStatus::Completed => "Su mantenimiento fue completado",
        MaintenanceStatus::Cancelled => "Su mantenimiento fue cancelado",
    }
}

/// Manages the maintenance record lifecycle.
#[derive(Debug, Clone)]
pub struct MaintenanceService {
    maintenance_repo: Arc<MaintenanceRepository>,
    user_repo: Arc<UserRepository>,
    notifications: Arc<NotificationService>,
}

impl MaintenanceService {
    /// Creates a new maintenance service.
    pub fn new(
        maintenance_repo: Arc<MaintenanceRepository>,
        user_repo: Arc<UserRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            maintenance_repo,
            user_repo,
            notifications,
        }
    }

    /// A client submits a maintenance request from the portal. The record
    /// starts in `pending_approval`; every active admin is notified
    /// best-effort afterwards.
    pub async fn create_request(
        &self,
        ctx: &PortalContext,
        data: CreateRequest,
    ) -> Result<MaintenanceRecord, AppError> {
        if data.title.trim().is_empty() {
            return Err(AppError::validation("A title is required"));
        }

        let record = self
            .maintenance_repo
            .create_request(
                ctx.client_id,
                data.solar_system_id,
                data.maintenance_type,
                &data.title,
                data.description.as_deref(),
                data.priority.unwrap_or(MaintenancePriority::Scheduled),
                data.preferred_date,
            )
            .await?;

        info!(maintenance_id = %record.id, client_id = %ctx.client_id, "Maintenance requested");

        self.notifications
            .notify_admins(
                "maintenance.requested",
                "Nueva solicitud de mantenimiento",
                &format!("Solicitud: {}", record.title),
                Some(json!({ "maintenance_id": record.id, "client_id": ctx.client_id })),
            )
            .await;

        Ok(record)
    }

    /// Staff schedules a maintenance visit directly. The record starts in
    /// `scheduled` with one history entry; the client is notified.
    pub async fn create_scheduled(
        &self,
        ctx: &StaffContext,
        data: CreateScheduled,
    ) -> Result<MaintenanceRecord, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Write)?;

        if data.title.trim().is_empty() {
            return Err(AppError::validation("A title is required"));
        }
        if data.technician_ids.is_empty() {
            return Err(AppError::validation("At least one technician is required"));
        }
        for technician_id in &data.technician_ids {
            let user = self
                .user_repo
                .find_by_id(*technician_id)
                .await?
                .ok_or_else(|| AppError::not_found("Technician not found"))?;
            if user.role != UserRole::Technician || !user.is_active {
                return Err(AppError::validation(format!(
                    "User '{}' is not an active technician",
                    user.username
                )));
            }
        }

        let record = self
            .maintenance_repo
            .create_scheduled(
                data.client_id,
                data.solar_system_id,
                data.maintenance_type,
                &data.title,
                data.description.as_deref(),
                data.priority.unwrap_or(MaintenancePriority::Scheduled),
                data.scheduled_date,
                ctx.user_id,
                &data.technician_ids,
            )
            .await?;

        info!(maintenance_id = %record.id, actor = %ctx.user_id, "Maintenance scheduled");

        self.notifications
            .notify_client(
                record.client_id,
                "maintenance.scheduled",
                "Mantenimiento agendado",
                status_message(MaintenanceStatus::Scheduled),
                Some(json!({ "maintenance_id": record.id })),
            )
            .await;

        Ok(record)
    }

    /// Applies a status transition, appending to the history trail.
    ///
    /// Moving to `in_progress` stamps `started_date` (first time only);
    /// `completed` stamps `completed_date`. Any status may be set from any
    /// other — the workflow is deliberately permissive.
    pub async fn transition_status(
        &self,
        ctx: &StaffContext,
        id: Uuid,
        new_status: MaintenanceStatus,
        notes: Option<&str>,
    ) -> Result<MaintenanceRecord, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Write)?;

        // Ensure the record exists before touching history.
        self.maintenance_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Maintenance record not found"))?;

        let record = self
            .maintenance_repo
            .transition(
                id,
                new_status,
                new_status == MaintenanceStatus::InProgress,
                new_status == MaintenanceStatus::Completed,
                HistoryActor::Staff(ctx.user_id),
                notes,
            )
            .await?;

        info!(
            maintenance_id = %id,
            status = %new_status,
            actor = %ctx.user_id,
            "Maintenance status changed"
        );

        self.notifications
            .notify_client(
                record.client_id,
                "maintenance.status_changed",
                "Actualización de mantenimiento",
                status_message(new_status),
                Some(json!({ "maintenance_id": id, "status": new_status })),
            )
            .await;

        Ok(record)
    }

    /// A portal client cancels their own request.
    pub async fn cancel_own(
        &self,
        ctx: &PortalContext,
        id: Uuid,
        notes: Option<&str>,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = self.get_owned(ctx, id).await?;
        if matches!(
            record.status,
            MaintenanceStatus::Completed | MaintenanceStatus::Cancelled
        ) {
            return Err(AppError::conflict("Record is already closed"));
        }

        let record = self
            .maintenance_repo
            .transition(
                id,
                MaintenanceStatus::Cancelled,
                false,
                false,
                HistoryActor::Client(ctx.client_id),
                notes,
            )
            .await?;

        info!(maintenance_id = %id, client_id = %ctx.client_id, "Maintenance cancelled by client");

        self.notifications
            .notify_admins(
                "maintenance.cancelled",
                "Mantenimiento cancelado por el cliente",
                &format!("El cliente canceló: {}", record.title),
                Some(json!({ "maintenance_id": id, "client_id": ctx.client_id })),
            )
            .await;

        Ok(record)
    }

    /// A portal client deletes their own record. Permitted only when the
    /// record is cancelled.
    pub async fn delete_own(&self, ctx: &PortalContext, id: Uuid) -> Result<(), AppError> {
        let record = self.get_owned(ctx, id).await?;

        if !record.status.is_deletable() {
            return Err(AppError::conflict(
                "Only cancelled maintenance records can be deleted",
            ));
        }

        self.maintenance_repo.delete(id).await?;
        info!(maintenance_id = %id, client_id = %ctx.client_id, "Maintenance deleted by client");
        Ok(())
    }

    /// Staff listing with filters.
    pub async fn list(
        &self,
        ctx: &StaffContext,
        page: &PageRequest,
        filter: MaintenanceFilter,
    ) -> Result<PageResponse<MaintenanceRecord>, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Read)?;

        // Technicians only see their own assignments.
        let filter = if ctx.role == UserRole::Technician {
            MaintenanceFilter {
                technician_id: Some(ctx.user_id),
                ..filter
            }
        } else {
            filter
        };

        self.maintenance_repo.find_all(page, &filter).await
    }

    /// Portal listing of the client's own records.
    pub async fn list_own(
        &self,
        ctx: &PortalContext,
        page: &PageRequest,
    ) -> Result<PageResponse<MaintenanceRecord>, AppError> {
        self.maintenance_repo
            .find_all(
                page,
                &MaintenanceFilter {
                    client_id: Some(ctx.client_id),
                    ..Default::default()
                },
            )
            .await
    }

    /// Fetches one record (staff view).
    pub async fn get(&self, ctx: &StaffContext, id: Uuid) -> Result<MaintenanceRecord, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Read)?;
        self.maintenance_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Maintenance record not found"))
    }

    /// Fetches one of the portal client's own records.
    pub async fn get_owned(
        &self,
        ctx: &PortalContext,
        id: Uuid,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = self
            .maintenance_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Maintenance record not found"))?;
        if record.client_id != ctx.client_id {
            return Err(AppError::not_found("Maintenance record not found"));
        }
        Ok(record)
    }

    /// The ordered status history of a record.
    pub async fn history(
        &self,
        ctx: &StaffContext,
        id: Uuid,
    ) -> Result<Vec<StatusHistoryEntry>, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Read)?;
        self.get(ctx, id).await?;
        self.maintenance_repo.find_history(id).await
    }

    /// The technician assignments of a record.
    pub async fn assignments(
        &self,
        ctx: &StaffContext,
        id: Uuid,
    ) -> Result<Vec<TechnicianAssignment>, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Read)?;
        self.get(ctx, id).await?;
        self.maintenance_repo.find_assignments(id).await
    }
}
