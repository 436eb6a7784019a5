//! Product entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An item in the sales catalog (panels, inverters, mounting hardware,
/// installation service line items).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Unique stock-keeping unit.
    pub sku: String,
    /// Product name.
    pub name: String,
    /// Longer description.
    pub description: Option<String>,
    /// Catalog category (e.g. "panel", "inverter", "service").
    pub category: Option<String>,
    /// Sale price per unit.
    pub unit_price: Decimal,
    /// Acquisition cost per unit.
    pub unit_cost: Decimal,
    /// Current on-hand quantity.
    pub stock_quantity: i32,
    /// Quantity at which the product shows up in the low-stock report.
    pub reorder_level: i32,
    /// Whether the product is sellable.
    pub is_active: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Check if the product is at or below its reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.reorder_level
    }
}

/// Data required to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Stock-keeping unit.
    pub sku: String,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Sale price.
    pub unit_price: Decimal,
    /// Acquisition cost.
    pub unit_cost: Decimal,
    /// Initial stock.
    pub stock_quantity: i32,
    /// Reorder level.
    pub reorder_level: i32,
}

/// Data for updating an existing product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProduct {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New sale price.
    pub unit_price: Option<Decimal>,
    /// New acquisition cost.
    pub unit_cost: Option<Decimal>,
    /// New reorder level.
    pub reorder_level: Option<i32>,
}
