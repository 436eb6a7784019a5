//! Growatt API response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Session handle returned by the vendor login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowattSession {
    /// Opaque session token passed to subsequent calls.
    pub token: String,
}

/// One plant (installation) with its generation metrics, as reported by
/// the vendor plant-list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowattPlant {
    /// Vendor plant identifier.
    #[serde(rename = "plantId")]
    pub plant_id: String,
    /// Plant display name.
    #[serde(rename = "plantName")]
    pub plant_name: Option<String>,
    /// Vendor status string ("0" offline, "1" online, "2" fault).
    pub status: Option<String>,
    /// Instantaneous output power, W.
    #[serde(rename = "currentPower")]
    pub current_power_w: Option<Decimal>,
    /// Energy generated today, kWh.
    #[serde(rename = "eToday")]
    pub energy_today_kwh: Option<Decimal>,
    /// Energy generated this month, kWh.
    #[serde(rename = "eMonth")]
    pub energy_month_kwh: Option<Decimal>,
    /// Energy generated this year, kWh.
    #[serde(rename = "eYear")]
    pub energy_year_kwh: Option<Decimal>,
    /// Lifetime energy, kWh.
    #[serde(rename = "eTotal")]
    pub energy_total_kwh: Option<Decimal>,
    /// Lifetime CO2 reduction, kg.
    #[serde(rename = "co2")]
    pub co2_reduction_kg: Option<Decimal>,
    /// Estimated lifetime revenue.
    #[serde(rename = "moneyText")]
    pub revenue: Option<Decimal>,
}

/// Envelope of the vendor login response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    pub(crate) result: i32,
    #[serde(rename = "sessionToken")]
    pub(crate) session_token: Option<String>,
    pub(crate) msg: Option<String>,
}

/// Envelope of the vendor plant-list response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlantListResponse {
    pub(crate) result: i32,
    #[serde(default)]
    pub(crate) plants: Vec<GrowattPlant>,
    pub(crate) msg: Option<String>,
}
