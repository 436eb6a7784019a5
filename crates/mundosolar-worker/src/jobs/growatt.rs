//! Growatt cache refresh job handler.
//!
//! Logs in to the vendor API, fetches the plant list, and upserts one
//! cache row per client whose solar system reports to a fetched plant.
//! On vendor failure every cached row is flagged stale — the explicit
//! staleness path, independent of expiry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::{info, warn};

use mundosolar_database::repositories::growatt_cache::{CacheUpsert, GrowattCacheRepository};
use mundosolar_database::repositories::system::SolarSystemRepository;
use mundosolar_entity::job::model::Job;
use mundosolar_growatt::{GrowattClient, GrowattPlant};

use crate::executor::{JobExecutionError, JobHandler};

/// Refreshes the Growatt data cache from the vendor API.
#[derive(Debug)]
pub struct GrowattRefreshHandler {
    client: GrowattClient,
    cache_repo: Arc<GrowattCacheRepository>,
    system_repo: Arc<SolarSystemRepository>,
    cache_ttl_minutes: i64,
}

impl GrowattRefreshHandler {
    /// Create a new refresh handler.
    pub fn new(
        client: GrowattClient,
        cache_repo: Arc<GrowattCacheRepository>,
        system_repo: Arc<SolarSystemRepository>,
        cache_ttl_minutes: i64,
    ) -> Self {
        Self {
            client,
            cache_repo,
            system_repo,
            cache_ttl_minutes,
        }
    }

    async fn refresh(&self) -> Result<Value, JobExecutionError> {
        let mappings = self.system_repo.plant_client_pairs().await.map_err(|e| {
            JobExecutionError::Transient(format!("Could not load plant mappings: {e}"))
        })?;
        if mappings.is_empty() {
            return Ok(serde_json::json!({ "task": "growatt_refresh", "plants_updated": 0 }));
        }

        let plants = match self.fetch_plants().await {
            Ok(plants) => plants,
            Err(e) => {
                // Vendor unreachable: flag everything stale so dashboards
                // stop trusting the numbers, then surface the failure.
                warn!(error = %e, "Growatt fetch failed, marking cache stale");
                if let Err(mark_err) = self.cache_repo.mark_all_stale().await {
                    warn!(error = %mark_err, "Could not mark cache rows stale");
                }
                return Err(JobExecutionError::Transient(e.to_string()));
            }
        };

        let by_plant: HashMap<&str, &GrowattPlant> = plants
            .iter()
            .map(|p| (p.plant_id.as_str(), p))
            .collect();
        let expires_at = Utc::now() + Duration::minutes(self.cache_ttl_minutes);

        let mut updated = 0u64;
        let mut missing = 0u64;
        for (plant_id, client_id) in &mappings {
            let Some(plant) = by_plant.get(plant_id.as_str()) else {
                // Plant vanished from the vendor account; its cached data
                // can no longer be trusted.
                missing += 1;
                if let Err(e) = self.cache_repo.mark_stale(*client_id).await {
                    warn!(client_id = %client_id, error = %e, "Could not mark row stale");
                }
                continue;
            };

            let upsert = CacheUpsert {
                client_id: *client_id,
                plant_id: plant.plant_id.clone(),
                plant_name: plant.plant_name.clone(),
                status: plant.status.clone(),
                current_power_w: plant.current_power_w,
                energy_today_kwh: plant.energy_today_kwh,
                energy_month_kwh: plant.energy_month_kwh,
                energy_year_kwh: plant.energy_year_kwh,
                energy_total_kwh: plant.energy_total_kwh,
                co2_reduction_kg: plant.co2_reduction_kg,
                revenue: plant.revenue,
                expires_at,
            };
            match self.cache_repo.upsert(&upsert).await {
                Ok(_) => updated += 1,
                Err(e) => {
                    warn!(client_id = %client_id, error = %e, "Cache upsert failed");
                }
            }
        }

        info!(updated, missing, "Growatt cache refreshed");
        Ok(serde_json::json!({
            "task": "growatt_refresh",
            "plants_updated": updated,
            "plants_missing": missing,
        }))
    }

    async fn fetch_plants(
        &self,
    ) -> Result<Vec<GrowattPlant>, mundosolar_core::error::AppError> {
        let session = self.client.login().await?;
        self.client.plant_list(&session).await
    }
}

#[async_trait]
impl JobHandler for GrowattRefreshHandler {
    fn job_type(&self) -> &str {
        "growatt_refresh"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let result = self.refresh().await?;
        Ok(Some(result))
    }
}
