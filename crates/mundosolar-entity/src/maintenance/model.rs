//! Maintenance record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{MaintenancePriority, MaintenanceStatus, MaintenanceType};

/// A maintenance visit for a client's installation.
///
/// Created either by a client request from the portal (starts
/// `pending_approval`) or directly by staff (starts `scheduled`). Mutated
/// only through status transitions, each appended to the record's history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Client whose installation is serviced.
    pub client_id: Uuid,
    /// Specific solar system, when known.
    pub solar_system_id: Option<Uuid>,
    /// Short title.
    pub title: String,
    /// Longer description of the work or the reported problem.
    pub description: Option<String>,
    /// Kind of work.
    pub maintenance_type: MaintenanceType,
    /// Lifecycle status.
    pub status: MaintenanceStatus,
    /// Urgency.
    pub priority: MaintenancePriority,
    /// When the client submitted the request (portal-created records).
    pub requested_date: Option<DateTime<Utc>>,
    /// When the visit is scheduled.
    pub scheduled_date: Option<DateTime<Utc>>,
    /// When work started on site.
    pub started_date: Option<DateTime<Utc>>,
    /// When work finished.
    pub completed_date: Option<DateTime<Utc>>,
    /// Staff member who created the record; None for portal requests.
    pub created_by: Option<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Whether the record still blocks its technicians' availability.
    pub fn blocks_technicians(&self) -> bool {
        self.status.blocks_technicians()
    }
}

/// A client-originated maintenance request from the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Kind of work requested.
    pub maintenance_type: MaintenanceType,
    /// Short title.
    pub title: String,
    /// Problem description.
    pub description: Option<String>,
    /// Date the client would prefer.
    pub preferred_date: Option<DateTime<Utc>>,
    /// Specific system, when the client selected one.
    pub solar_system_id: Option<Uuid>,
    /// Urgency; defaults to scheduled.
    pub priority: Option<MaintenancePriority>,
}

/// A staff-created maintenance visit, scheduled directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduled {
    /// Client whose installation is serviced.
    pub client_id: Uuid,
    /// Specific system, when known.
    pub solar_system_id: Option<Uuid>,
    /// Kind of work.
    pub maintenance_type: MaintenanceType,
    /// Short title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Scheduled date and hour of the visit.
    pub scheduled_date: DateTime<Utc>,
    /// Urgency; defaults to scheduled.
    pub priority: Option<MaintenancePriority>,
    /// Technicians assigned to the visit; first is the lead.
    pub technician_ids: Vec<Uuid>,
}
