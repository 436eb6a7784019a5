//! Solar system repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_entity::system::model::CreateSolarSystem;
use mundosolar_entity::system::SolarSystem;

/// Repository for solar system records.
#[derive(Debug, Clone)]
pub struct SolarSystemRepository {
    pool: PgPool,
}

impl SolarSystemRepository {
    /// Create a new solar system repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a system by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SolarSystem>> {
        sqlx::query_as::<_, SolarSystem>("SELECT * FROM solar_systems WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find system", e))
    }

    /// List all systems belonging to a client.
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<SolarSystem>> {
        sqlx::query_as::<_, SolarSystem>(
            "SELECT * FROM solar_systems WHERE client_id = $1 ORDER BY created_at",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list systems", e))
    }

    /// Map Growatt plant ids to owning clients, for the refresh job.
    ///
    /// Returns `(growatt_plant_id, client_id)` for every system with a
    /// plant id configured.
    pub async fn plant_client_pairs(&self) -> AppResult<Vec<(String, Uuid)>> {
        let rows: Vec<(String, Uuid)> = sqlx::query_as(
            "SELECT growatt_plant_id, client_id FROM solar_systems \
             WHERE growatt_plant_id IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list plant mappings", e)
        })?;
        Ok(rows)
    }

    /// Register a new system.
    pub async fn create(&self, data: &CreateSolarSystem) -> AppResult<SolarSystem> {
        sqlx::query_as::<_, SolarSystem>(
            "INSERT INTO solar_systems \
                (client_id, name, capacity_kw, panel_count, inverter_model, growatt_plant_id, installed_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.client_id)
        .bind(&data.name)
        .bind(data.capacity_kw)
        .bind(data.panel_count)
        .bind(&data.inverter_model)
        .bind(&data.growatt_plant_id)
        .bind(data.installed_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create system", e))
    }

    /// Delete a system.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM solar_systems WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete system", e))?;
        Ok(result.rows_affected() > 0)
    }
}
