//! Maintenance repository implementation.
//!
//! Creation writes the record, its first history entry, and any
//! technician assignments in one transaction, so a record can never exist
//! without the history seed.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_entity::maintenance::{
    AssignmentRole, MaintenancePriority, MaintenanceRecord, MaintenanceStatus, MaintenanceType,
    StatusHistoryEntry, TechnicianAssignment,
};

/// Who performed a status change, for the history trail.
#[derive(Debug, Clone, Copy)]
pub enum HistoryActor {
    /// A staff user.
    Staff(Uuid),
    /// A portal client.
    Client(Uuid),
}

impl HistoryActor {
    fn staff_id(&self) -> Option<Uuid> {
        match self {
            Self::Staff(id) => Some(*id),
            Self::Client(_) => None,
        }
    }

    fn client_id(&self) -> Option<Uuid> {
        match self {
            Self::Staff(_) => None,
            Self::Client(id) => Some(*id),
        }
    }
}

/// Filters for the maintenance list endpoint.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    /// Restrict to one client.
    pub client_id: Option<Uuid>,
    /// Restrict to one status.
    pub status: Option<MaintenanceStatus>,
    /// Restrict to one technician's assignments.
    pub technician_id: Option<Uuid>,
}

/// Repository for maintenance records, history, and assignments.
#[derive(Debug, Clone)]
pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    /// Create a new maintenance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a record by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find maintenance record", e)
            })
    }

    /// List records with pagination and filters.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &MaintenanceFilter,
    ) -> AppResult<PageResponse<MaintenanceRecord>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT m.id) FROM maintenance_records m \
             LEFT JOIN maintenance_assignments a ON a.maintenance_id = m.id \
             WHERE ($1::uuid IS NULL OR m.client_id = $1) \
               AND ($2::maintenance_status IS NULL OR m.status = $2) \
               AND ($3::uuid IS NULL OR a.technician_id = $3)",
        )
        .bind(filter.client_id)
        .bind(filter.status)
        .bind(filter.technician_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count maintenance records", e)
        })?;

        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT DISTINCT m.* FROM maintenance_records m \
             LEFT JOIN maintenance_assignments a ON a.maintenance_id = m.id \
             WHERE ($1::uuid IS NULL OR m.client_id = $1) \
               AND ($2::maintenance_status IS NULL OR m.status = $2) \
               AND ($3::uuid IS NULL OR a.technician_id = $3) \
             ORDER BY m.created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(filter.client_id)
        .bind(filter.status)
        .bind(filter.technician_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list maintenance records", e)
        })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a portal-originated request in `pending_approval`, seeding
    /// the history in the same transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_request(
        &self,
        client_id: Uuid,
        solar_system_id: Option<Uuid>,
        maintenance_type: MaintenanceType,
        title: &str,
        description: Option<&str>,
        priority: MaintenancePriority,
        preferred_date: Option<DateTime<Utc>>,
    ) -> AppResult<MaintenanceRecord> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            "INSERT INTO maintenance_records \
                (client_id, solar_system_id, title, description, maintenance_type, \
                 status, priority, requested_date, scheduled_date) \
             VALUES ($1, $2, $3, $4, $5, 'pending_approval', $6, NOW(), $7) RETURNING *",
        )
        .bind(client_id)
        .bind(solar_system_id)
        .bind(title)
        .bind(description)
        .bind(maintenance_type)
        .bind(priority)
        .bind(preferred_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create maintenance request", e)
        })?;

        sqlx::query(
            "INSERT INTO maintenance_status_history \
                (maintenance_id, status, changed_by_client, notes) \
             VALUES ($1, 'pending_approval', $2, $3)",
        )
        .bind(record.id)
        .bind(client_id)
        .bind(description)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed history", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit maintenance request", e)
        })?;

        Ok(record)
    }

    /// Create a staff-scheduled record with technician assignments and the
    /// initial history entry in one transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_scheduled(
        &self,
        client_id: Uuid,
        solar_system_id: Option<Uuid>,
        maintenance_type: MaintenanceType,
        title: &str,
        description: Option<&str>,
        priority: MaintenancePriority,
        scheduled_date: DateTime<Utc>,
        created_by: Uuid,
        technician_ids: &[Uuid],
    ) -> AppResult<MaintenanceRecord> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            "INSERT INTO maintenance_records \
                (client_id, solar_system_id, title, description, maintenance_type, \
                 status, priority, scheduled_date, created_by) \
             VALUES ($1, $2, $3, $4, $5, 'scheduled', $6, $7, $8) RETURNING *",
        )
        .bind(client_id)
        .bind(solar_system_id)
        .bind(title)
        .bind(description)
        .bind(maintenance_type)
        .bind(priority)
        .bind(scheduled_date)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create maintenance", e)
        })?;

        sqlx::query(
            "INSERT INTO maintenance_status_history (maintenance_id, status, changed_by) \
             VALUES ($1, 'scheduled', $2)",
        )
        .bind(record.id)
        .bind(created_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed history", e))?;

        for (i, technician_id) in technician_ids.iter().enumerate() {
            let role = if i == 0 {
                AssignmentRole::Lead
            } else {
                AssignmentRole::Assistant
            };
            sqlx::query(
                "INSERT INTO maintenance_assignments (maintenance_id, technician_id, role) \
                 VALUES ($1, $2, $3)",
            )
            .bind(record.id)
            .bind(technician_id)
            .bind(role)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to assign technician", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit maintenance", e)
        })?;

        Ok(record)
    }

    /// Apply a status transition: update the record, stamp the started/
    /// completed dates when requested, and append the history entry — all
    /// in one transaction.
    pub async fn transition(
        &self,
        id: Uuid,
        status: MaintenanceStatus,
        set_started: bool,
        set_completed: bool,
        actor: HistoryActor,
        notes: Option<&str>,
    ) -> AppResult<MaintenanceRecord> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            "UPDATE maintenance_records SET \
                status = $2, \
                started_date = CASE WHEN $3 AND started_date IS NULL THEN NOW() ELSE started_date END, \
                completed_date = CASE WHEN $4 THEN NOW() ELSE completed_date END, \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(set_started)
        .bind(set_completed)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?
        .ok_or_else(|| AppError::not_found("Maintenance record not found"))?;

        sqlx::query(
            "INSERT INTO maintenance_status_history \
                (maintenance_id, status, changed_by, changed_by_client, notes) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(status)
        .bind(actor.staff_id())
        .bind(actor.client_id())
        .bind(notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append history", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transition", e)
        })?;

        Ok(record)
    }

    /// Delete a record (history and assignments cascade).
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete maintenance", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// The ordered status history of a record.
    pub async fn find_history(&self, maintenance_id: Uuid) -> AppResult<Vec<StatusHistoryEntry>> {
        sqlx::query_as::<_, StatusHistoryEntry>(
            "SELECT * FROM maintenance_status_history \
             WHERE maintenance_id = $1 ORDER BY created_at",
        )
        .bind(maintenance_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list history", e))
    }

    /// The technician assignments of a record.
    pub async fn find_assignments(
        &self,
        maintenance_id: Uuid,
    ) -> AppResult<Vec<TechnicianAssignment>> {
        sqlx::query_as::<_, TechnicianAssignment>(
            "SELECT * FROM maintenance_assignments WHERE maintenance_id = $1 ORDER BY assigned_at",
        )
        .bind(maintenance_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list assignments", e))
    }

    /// `(technician_id, scheduled_hour)` pairs for every assignment whose
    /// maintenance still blocks time on the given day. Input to the
    /// availability scan.
    pub async fn blocking_assignments_on(&self, date: NaiveDate) -> AppResult<Vec<(Uuid, i32)>> {
        let rows: Vec<(Uuid, i32)> = sqlx::query_as(
            "SELECT a.technician_id, EXTRACT(HOUR FROM m.scheduled_date)::int AS hour \
             FROM maintenance_assignments a \
             JOIN maintenance_records m ON m.id = a.maintenance_id \
             WHERE m.scheduled_date::date = $1 \
               AND m.status NOT IN ('cancelled', 'completed')",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list day assignments", e)
        })?;
        Ok(rows)
    }

    /// Count records per status, for the dashboard.
    pub async fn count_by_status(&self, status: MaintenanceStatus) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_records WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count maintenance", e)
            })
    }
}
