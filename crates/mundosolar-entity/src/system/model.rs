//! Solar system entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A photovoltaic installation owned by a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SolarSystem {
    /// Unique system identifier.
    pub id: Uuid,
    /// Owning client.
    pub client_id: Uuid,
    /// Human-readable name (e.g. "Bodega norte").
    pub name: String,
    /// Installed capacity in kW.
    pub capacity_kw: Decimal,
    /// Number of panels.
    pub panel_count: i32,
    /// Inverter model.
    pub inverter_model: Option<String>,
    /// Growatt plant identifier, when the inverter reports to Growatt.
    pub growatt_plant_id: Option<String>,
    /// Commissioning date.
    pub installed_on: Option<NaiveDate>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a new solar system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSolarSystem {
    /// Owning client.
    pub client_id: Uuid,
    /// Name.
    pub name: String,
    /// Capacity in kW.
    pub capacity_kw: Decimal,
    /// Panel count.
    pub panel_count: i32,
    /// Inverter model.
    pub inverter_model: Option<String>,
    /// Growatt plant identifier.
    pub growatt_plant_id: Option<String>,
    /// Commissioning date.
    pub installed_on: Option<NaiveDate>,
}
