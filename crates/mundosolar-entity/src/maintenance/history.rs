//! Maintenance status history entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::MaintenanceStatus;

/// One entry in a maintenance record's ordered status history.
///
/// Exactly one of `changed_by` (staff) and `changed_by_client` is set,
/// except for system-originated entries where both may be empty.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusHistoryEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Maintenance record this entry belongs to.
    pub maintenance_id: Uuid,
    /// Status the record moved to.
    pub status: MaintenanceStatus,
    /// Staff member who made the change.
    pub changed_by: Option<Uuid>,
    /// Portal client who made the change.
    pub changed_by_client: Option<Uuid>,
    /// Free-form notes attached to the transition.
    pub notes: Option<String>,
    /// When the transition happened.
    pub created_at: DateTime<Utc>,
}
