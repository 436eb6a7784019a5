//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Which side of the application a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recipient_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    /// A staff user.
    Staff,
    /// A portal client.
    Client,
}

/// An in-app notification delivered to a staff user or a portal client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Staff or client recipient.
    pub recipient_type: RecipientType,
    /// Recipient user/client id.
    pub recipient_id: Uuid,
    /// Event type that produced this notification
    /// (e.g. `"maintenance.requested"`, `"maintenance.status_changed"`).
    pub notification_type: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Correlation payload (e.g. `{"maintenance_id": …}`).
    pub data: Option<serde_json::Value>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When it was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Staff or client recipient.
    pub recipient_type: RecipientType,
    /// Recipient id.
    pub recipient_id: Uuid,
    /// Event type.
    pub notification_type: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Correlation payload.
    pub data: Option<serde_json::Value>,
}
