//! Notification fan-out and inbox workflows.
//!
//! Fan-out is best-effort: a failed notification insert is logged and
//! swallowed so the primary write that triggered it still succeeds.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_database::repositories::notification::NotificationRepository;
use mundosolar_database::repositories::user::UserRepository;
use mundosolar_entity::notification::model::NewNotification;
use mundosolar_entity::notification::{Notification, RecipientType};
use mundosolar_entity::user::UserRole;

use crate::context::{PortalContext, StaffContext};

/// Manages notifications for staff and portal recipients.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notification_repo: Arc<NotificationRepository>,
    user_repo: Arc<UserRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notification_repo: Arc<NotificationRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
        }
    }

    /// Notify every active administrator. Best-effort: failures are
    /// logged as warnings and never propagated.
    pub async fn notify_admins(
        &self,
        notification_type: &str,
        title: &str,
        message: &str,
        data: Option<serde_json::Value>,
    ) {
        let admins = match self.user_repo.find_active_by_role(UserRole::Admin).await {
            Ok(admins) => admins,
            Err(e) => {
                warn!(error = %e, "Could not load admins for notification fan-out");
                return;
            }
        };

        for admin in admins {
            let result = self
                .notification_repo
                .create(&NewNotification {
                    recipient_type: RecipientType::Staff,
                    recipient_id: admin.id,
                    notification_type: notification_type.to_string(),
                    title: title.to_string(),
                    message: message.to_string(),
                    data: data.clone(),
                })
                .await;
            if let Err(e) = result {
                warn!(user_id = %admin.id, error = %e, "Failed to create admin notification");
            }
        }
    }

    /// Notify one portal client. Best-effort, like the admin fan-out.
    pub async fn notify_client(
        &self,
        client_id: Uuid,
        notification_type: &str,
        title: &str,
        message: &str,
        data: Option<serde_json::Value>,
    ) {
        let result = self
            .notification_repo
            .create(&NewNotification {
                recipient_type: RecipientType::Client,
                recipient_id: client_id,
                notification_type: notification_type.to_string(),
                title: title.to_string(),
                message: message.to_string(),
                data,
            })
            .await;
        if let Err(e) = result {
            warn!(client_id = %client_id, error = %e, "Failed to create client notification");
        }
    }

    /// Lists the staff user's notifications.
    pub async fn list_for_staff(
        &self,
        ctx: &StaffContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notification_repo
            .find_by_recipient(RecipientType::Staff, ctx.user_id, page)
            .await
    }

    /// Unread count for the staff user.
    pub async fn unread_count_staff(&self, ctx: &StaffContext) -> Result<i64, AppError> {
        self.notification_repo
            .count_unread(RecipientType::Staff, ctx.user_id)
            .await
    }

    /// Marks one staff notification as read.
    pub async fn mark_read_staff(&self, ctx: &StaffContext, id: Uuid) -> Result<(), AppError> {
        self.notification_repo
            .mark_read(id, RecipientType::Staff, ctx.user_id)
            .await
    }

    /// Marks all staff notifications as read.
    pub async fn mark_all_read_staff(&self, ctx: &StaffContext) -> Result<u64, AppError> {
        self.notification_repo
            .mark_all_read(RecipientType::Staff, ctx.user_id)
            .await
    }

    /// Lists the portal client's notifications.
    pub async fn list_for_client(
        &self,
        ctx: &PortalContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notification_repo
            .find_by_recipient(RecipientType::Client, ctx.client_id, page)
            .await
    }

    /// Unread count for the portal client.
    pub async fn unread_count_client(&self, ctx: &PortalContext) -> Result<i64, AppError> {
        self.notification_repo
            .count_unread(RecipientType::Client, ctx.client_id)
            .await
    }

    /// Marks one portal notification as read.
    pub async fn mark_read_client(&self, ctx: &PortalContext, id: Uuid) -> Result<(), AppError> {
        self.notification_repo
            .mark_read(id, RecipientType::Client, ctx.client_id)
            .await
    }
}
