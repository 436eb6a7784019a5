//! Growatt cache reader: freshness derivation over the periodically
//! refreshed cache table. Interactive requests never write metrics here;
//! they only read or flip the staleness flag.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_database::repositories::growatt_cache::GrowattCacheRepository;
use mundosolar_entity::growatt::GrowattDataCache;

use crate::context::{PortalContext, StaffContext};

/// Cached generation metrics with derived freshness, as served to
/// dashboards. All metric fields are null-coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedGeneration {
    /// Client the metrics belong to.
    pub client_id: Uuid,
    /// Vendor plant identifier.
    pub plant_id: String,
    /// Vendor plant name.
    pub plant_name: Option<String>,
    /// Vendor-reported plant status string.
    pub status: Option<String>,
    /// Instantaneous output power, W.
    pub current_power_w: Decimal,
    /// Energy generated today, kWh.
    pub energy_today_kwh: Decimal,
    /// Energy generated this month, kWh.
    pub energy_month_kwh: Decimal,
    /// Energy generated this year, kWh.
    pub energy_year_kwh: Decimal,
    /// Lifetime energy, kWh.
    pub energy_total_kwh: Decimal,
    /// Lifetime CO2 reduction, kg.
    pub co2_reduction_kg: Decimal,
    /// Estimated lifetime revenue.
    pub revenue: Decimal,
    /// When the row was last refreshed.
    pub cached_at: DateTime<Utc>,
    /// Minutes since the last refresh.
    pub cache_age_minutes: i64,
    /// Stored flag OR expiry: whether the data is unreliable.
    pub is_stale: bool,
}

impl CachedGeneration {
    /// Project a cache row into the served shape at `now`.
    fn from_row(row: GrowattDataCache, now: DateTime<Utc>) -> Self {
        let freshness = row.freshness_at(now);
        Self {
            client_id: row.client_id,
            plant_id: row.plant_id,
            plant_name: row.plant_name,
            status: row.status,
            current_power_w: row.current_power_w.unwrap_or_default(),
            energy_today_kwh: row.energy_today_kwh.unwrap_or_default(),
            energy_month_kwh: row.energy_month_kwh.unwrap_or_default(),
            energy_year_kwh: row.energy_year_kwh.unwrap_or_default(),
            energy_total_kwh: row.energy_total_kwh.unwrap_or_default(),
            co2_reduction_kg: row.co2_reduction_kg.unwrap_or_default(),
            revenue: row.revenue.unwrap_or_default(),
            cached_at: row.cached_at,
            cache_age_minutes: freshness.cache_age_minutes,
            is_stale: freshness.is_stale,
        }
    }
}

/// Serves cached Growatt metrics with derived freshness.
#[derive(Debug, Clone)]
pub struct MonitoringService {
    cache_repo: Arc<GrowattCacheRepository>,
}

impl MonitoringService {
    /// Creates a new monitoring service.
    pub fn new(cache_repo: Arc<GrowattCacheRepository>) -> Self {
        Self { cache_repo }
    }

    /// Cached metrics for one client (staff view). `None` when the cache
    /// has never been populated for that client.
    pub async fn get_cached(
        &self,
        ctx: &StaffContext,
        client_id: Uuid,
    ) -> Result<Option<CachedGeneration>, AppError> {
        policy::authorize(ctx.role, Resource::Monitoring, Action::Read)?;
        let row = self.cache_repo.find_by_client(client_id).await?;
        Ok(row.map(|r| CachedGeneration::from_row(r, Utc::now())))
    }

    /// Cached metrics for the portal client's own dashboard.
    pub async fn get_own(
        &self,
        ctx: &PortalContext,
    ) -> Result<Option<CachedGeneration>, AppError> {
        let row = self.cache_repo.find_by_client(ctx.client_id).await?;
        Ok(row.map(|r| CachedGeneration::from_row(r, Utc::now())))
    }

    /// Batched cached metrics for a set of clients, keyed by client id.
    pub async fn get_bulk_cached(
        &self,
        ctx: &StaffContext,
        client_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, CachedGeneration>, AppError> {
        policy::authorize(ctx.role, Resource::Monitoring, Action::Read)?;
        let now = Utc::now();
        let rows = self.cache_repo.find_by_clients(client_ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.client_id, CachedGeneration::from_row(r, now)))
            .collect())
    }

    /// Flags one client's cache row as unreliable.
    pub async fn invalidate(&self, ctx: &StaffContext, client_id: Uuid) -> Result<(), AppError> {
        policy::authorize(ctx.role, Resource::Monitoring, Action::Write)?;
        if !self.cache_repo.mark_stale(client_id).await? {
            return Err(AppError::not_found("No cached data for this client"));
        }
        info!(client_id = %client_id, actor = %ctx.user_id, "Growatt cache invalidated");
        Ok(())
    }
}
