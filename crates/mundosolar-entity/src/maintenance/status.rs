//! Maintenance status, priority, and type enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a maintenance record.
///
/// No transition table is enforced: records are mutated only through the
/// status-transition path, which appends history but deliberately permits
/// any target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// Requested by a client, awaiting review.
    PendingApproval,
    /// Approved and placed on the calendar.
    Scheduled,
    /// Technician on site.
    InProgress,
    /// Work finished.
    Completed,
    /// Called off.
    Cancelled,
}

impl MaintenanceStatus {
    /// Whether this status still blocks the assigned technicians' time.
    pub fn blocks_technicians(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether the record may be deleted by its owning client.
    pub fn is_deletable(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency of a maintenance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "maintenance_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaintenancePriority {
    /// Routine, placed on the normal calendar.
    Scheduled,
    /// Requires immediate attention.
    Urgent,
}

/// Kind of work performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "maintenance_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceType {
    /// Periodic preventive service.
    Preventive,
    /// Repair of a reported fault.
    Corrective,
    /// Site/system inspection.
    Inspection,
    /// Panel cleaning.
    Cleaning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_statuses() {
        assert!(MaintenanceStatus::PendingApproval.blocks_technicians());
        assert!(MaintenanceStatus::Scheduled.blocks_technicians());
        assert!(MaintenanceStatus::InProgress.blocks_technicians());
        assert!(!MaintenanceStatus::Completed.blocks_technicians());
        assert!(!MaintenanceStatus::Cancelled.blocks_technicians());
    }

    #[test]
    fn test_only_cancelled_is_deletable() {
        assert!(MaintenanceStatus::Cancelled.is_deletable());
        assert!(!MaintenanceStatus::Completed.is_deletable());
        assert!(!MaintenanceStatus::Scheduled.is_deletable());
    }
}
