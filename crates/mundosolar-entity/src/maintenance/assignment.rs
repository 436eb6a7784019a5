//! Technician assignment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role a technician plays on a maintenance visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssignmentRole {
    /// Responsible technician.
    Lead,
    /// Supporting technician.
    Assistant,
}

/// Links a technician to a maintenance record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechnicianAssignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// Maintenance record.
    pub maintenance_id: Uuid,
    /// Assigned technician (staff user).
    pub technician_id: Uuid,
    /// Role on the visit.
    pub role: AssignmentRole,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
}
