//! Notification repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_entity::notification::model::NewNotification;
use mundosolar_entity::notification::{Notification, RecipientType};

/// Repository for notification CRUD operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List notifications for a recipient, newest first.
    pub async fn find_by_recipient(
        &self,
        recipient_type: RecipientType,
        recipient_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_type = $1 AND recipient_id = $2",
        )
        .bind(recipient_type)
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let notifs = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE recipient_type = $1 AND recipient_id = $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(recipient_type)
        .bind(recipient_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count unread notifications for a recipient.
    pub async fn count_unread(
        &self,
        recipient_type: RecipientType,
        recipient_id: Uuid,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_type = $1 AND recipient_id = $2 AND is_read = FALSE",
        )
        .bind(recipient_type)
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Create a notification.
    pub async fn create(&self, data: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications \
                (recipient_type, recipient_id, notification_type, title, message, data) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.recipient_type)
        .bind(data.recipient_id)
        .bind(&data.notification_type)
        .bind(&data.title)
        .bind(&data.message)
        .bind(&data.data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// Mark one notification as read, scoped to its recipient.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        recipient_type: RecipientType,
        recipient_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE id = $1 AND recipient_type = $2 AND recipient_id = $3",
        )
        .bind(notification_id)
        .bind(recipient_type)
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(())
    }

    /// Mark all of a recipient's notifications as read.
    pub async fn mark_all_read(
        &self,
        recipient_type: RecipientType,
        recipient_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE recipient_type = $1 AND recipient_id = $2 AND is_read = FALSE",
        )
        .bind(recipient_type)
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    /// Delete notifications older than the cutoff, returning the count.
    pub async fn cleanup_old(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE created_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to cleanup notifications", e)
            })?;
        Ok(result.rows_affected())
    }
}
