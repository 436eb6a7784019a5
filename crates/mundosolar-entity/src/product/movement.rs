//! Inventory movement entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Direction of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inventory_movement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Stock received into the warehouse.
    Inbound,
    /// Stock consumed by an order or installation.
    Outbound,
    /// Manual correction after a physical count.
    Adjustment,
}

impl MovementType {
    /// Signed stock delta for a movement of `quantity` units.
    ///
    /// Adjustments carry their own sign in the quantity itself.
    pub fn signed_delta(&self, quantity: i32) -> i32 {
        match self {
            Self::Inbound => quantity,
            Self::Outbound => -quantity,
            Self::Adjustment => quantity,
        }
    }
}

/// One entry in the inventory ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryMovement {
    /// Unique movement identifier.
    pub id: Uuid,
    /// Product moved.
    pub product_id: Uuid,
    /// Movement direction.
    pub movement_type: MovementType,
    /// Units moved (positive; adjustments may be negative).
    pub quantity: i32,
    /// Free-form reference (order folio, supplier invoice, count sheet).
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Staff member who recorded the movement.
    pub recorded_by: Uuid,
    /// When the movement was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovement {
    /// Product moved.
    pub product_id: Uuid,
    /// Movement direction.
    pub movement_type: MovementType,
    /// Units moved.
    pub quantity: i32,
    /// Reference.
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_delta() {
        assert_eq!(MovementType::Inbound.signed_delta(5), 5);
        assert_eq!(MovementType::Outbound.signed_delta(5), -5);
        assert_eq!(MovementType::Adjustment.signed_delta(-3), -3);
    }
}
