//! Growatt data cache entity model and freshness derivation.
//!
//! One row per client, written by the periodic refresh job and read by
//! interactive requests. Staleness is derived, never materialized: a row
//! is unreliable either because the refresh job explicitly flagged it
//! (vendor fetch failure) or because its expiry has simply passed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cached generation metrics for one client's Growatt plant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrowattDataCache {
    /// Unique row identifier.
    pub id: Uuid,
    /// Client the metrics belong to (one row per client).
    pub client_id: Uuid,
    /// Vendor plant identifier.
    pub plant_id: String,
    /// Vendor plant name.
    pub plant_name: Option<String>,
    /// Vendor-reported plant status string.
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
    /// When the row was last refreshed.
    pub cached_at: DateTime<Utc>,
    /// When the row stops being fresh.
    pub expires_at: DateTime<Utc>,
    /// Explicit unreliability flag, set on vendor fetch failure or manual
    /// invalidation.
    pub is_stale: bool,
}

/// Freshness of a cache row at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheFreshness {
    /// Minutes since the row was refreshed.
    pub cache_age_minutes: i64,
    /// Whether the expiry timestamp has passed.
    pub is_expired: bool,
    /// Stored flag OR expiry — the row is unreliable if either holds.
    pub is_stale: bool,
}

impl GrowattDataCache {
    /// Derive freshness at `now`.
    pub fn freshness_at(&self, now: DateTime<Utc>) -> CacheFreshness {
        let is_expired = now > self.expires_at;
        CacheFreshness {
            cache_age_minutes: (now - self.cached_at).num_minutes(),
            is_expired,
            is_stale: self.is_stale || is_expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row(cached_at: DateTime<Utc>, expires_at: DateTime<Utc>, is_stale: bool) -> GrowattDataCache {
        GrowattDataCache {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            plant_id: "1234567".to_string(),
            plant_name: Some("Planta Norte".to_string()),
            status: Some("1".to_string()),
            current_power_w: None,
            energy_today_kwh: None,
            energy_month_kwh: None,
            energy_year_kwh: None,
            energy_total_kwh: None,
            co2_reduction_kg: None,
            revenue: None,
            cached_at,
            expires_at,
            is_stale,
        }
    }

    #[test]
    fn test_expired_row_is_stale_even_without_flag() {
        let now = Utc::now();
        let r = row(now - Duration::minutes(130), now - Duration::minutes(10), false);
        let f = r.freshness_at(now);
        assert!(f.is_expired);
        assert!(f.is_stale);
        assert_eq!(f.cache_age_minutes, 130);
    }

    #[test]
    fn test_recent_row_is_fresh() {
        let now = Utc::now();
        let r = row(now - Duration::minutes(5), now + Duration::minutes(1435), false);
        let f = r.freshness_at(now);
        assert!(!f.is_expired);
        assert!(!f.is_stale);
        assert_eq!(f.cache_age_minutes, 5);
    }

    #[test]
    fn test_stored_flag_overrides_valid_expiry() {
        let now = Utc::now();
        let r = row(now - Duration::minutes(5), now + Duration::hours(23), true);
        let f = r.freshness_at(now);
        assert!(!f.is_expired);
        assert!(f.is_stale);
    }
}
