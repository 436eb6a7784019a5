//! Growatt data cache repository implementation.
//!
//! Rows are written by the refresh job; interactive request handlers only
//! read them or flip the staleness flag.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_entity::growatt::GrowattDataCache;

/// Fresh metrics for one client, as produced by the refresh job.
#[derive(Debug, Clone)]
pub struct CacheUpsert {
    /// Client the metrics belong to.
    pub client_id: Uuid,
    /// Vendor plant identifier.
    pub plant_id: String,
    /// Vendor plant name.
    pub plant_name: Option<String>,
    /// Vendor-reported status string.
    pub status: Option<String>,
    /// Instantaneous output power in watts.
    pub current_power_w: Option<Decimal>,
    /// Energy generated today, kWh.
    pub energy_today_kwh: Option<Decimal>,
    /// Energy generated this month, kWh.
    pub energy_month_kwh: Option<Decimal>,
    /// Energy generated this year, kWh.
    pub energy_year_kwh: Option<Decimal>,
    /// Lifetime energy, kWh.
    pub energy_total_kwh: Option<Decimal>,
    /// Lifetime CO2 reduction, kg.
    pub co2_reduction_kg: Option<Decimal>,
    /// Estimated lifetime revenue.
    pub revenue: Option<Decimal>,
    /// When the row stops being fresh.
    pub expires_at: DateTime<Utc>,
}

/// Repository for the Growatt data cache table.
#[derive(Debug, Clone)]
pub struct GrowattCacheRepository {
    pool: PgPool,
}

impl GrowattCacheRepository {
    /// Create a new cache repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the cache row for a client.
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Option<GrowattDataCache>> {
        sqlx::query_as::<_, GrowattDataCache>(
            "SELECT * FROM growatt_data_cache WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cache row", e))
    }

    /// Find cache rows for a set of clients in one query.
    pub async fn find_by_clients(&self, client_ids: &[Uuid]) -> AppResult<Vec<GrowattDataCache>> {
        sqlx::query_as::<_, GrowattDataCache>(
            "SELECT * FROM growatt_data_cache WHERE client_id = ANY($1)",
        )
        .bind(client_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cache rows", e))
    }

    /// Insert or refresh a client's cache row, clearing the stale flag.
    pub async fn upsert(&self, data: &CacheUpsert) -> AppResult<GrowattDataCache> {
        sqlx::query_as::<_, GrowattDataCache>(
            "INSERT INTO growatt_data_cache \
                (client_id, plant_id, plant_name, status, current_power_w, energy_today_kwh, \
                 energy_month_kwh, energy_year_kwh, energy_total_kwh, co2_reduction_kg, revenue, \
                 cached_at, expires_at, is_stale) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), $12, FALSE) \
             ON CONFLICT (client_id) DO UPDATE SET \
                plant_id = EXCLUDED.plant_id, \
                plant_name = EXCLUDED.plant_name, \
                status = EXCLUDED.status, \
                current_power_w = EXCLUDED.current_power_w, \
                energy_today_kwh = EXCLUDED.energy_today_kwh, \
                energy_month_kwh = EXCLUDED.energy_month_kwh, \
                energy_year_kwh = EXCLUDED.energy_year_kwh, \
                energy_total_kwh = EXCLUDED.energy_total_kwh, \
                co2_reduction_kg = EXCLUDED.co2_reduction_kg, \
                revenue = EXCLUDED.revenue, \
                cached_at = NOW(), \
                expires_at = EXCLUDED.expires_at, \
                is_stale = FALSE \
             RETURNING *",
        )
        .bind(data.client_id)
        .bind(&data.plant_id)
        .bind(&data.plant_name)
        .bind(&data.status)
        .bind(data.current_power_w)
        .bind(data.energy_today_kwh)
        .bind(data.energy_month_kwh)
        .bind(data.energy_year_kwh)
        .bind(data.energy_total_kwh)
        .bind(data.co2_reduction_kg)
        .bind(data.revenue)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert cache row", e))
    }

    /// Set the stale flag on one client's row.
    pub async fn mark_stale(&self, client_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE growatt_data_cache SET is_stale = TRUE WHERE client_id = $1",
        )
        .bind(client_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark stale", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the stale flag on every row. Used when a whole vendor fetch
    /// cycle fails.
    pub async fn mark_all_stale(&self) -> AppResult<u64> {
        let result = sqlx::query("UPDATE growatt_data_cache SET is_stale = TRUE")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all stale", e))?;
        Ok(result.rows_affected())
    }

    /// Delete rows that are both expired and flagged stale, returning the
    /// count deleted.
    pub async fn cleanup_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM growatt_data_cache WHERE expires_at < $1 AND is_stale = TRUE",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cleanup cache rows", e)
        })?;
        Ok(result.rows_affected())
    }
}
