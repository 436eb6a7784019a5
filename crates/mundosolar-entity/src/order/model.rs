//! Order and order item entity models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{OrderStatus, PaymentStatus};

/// A sales order for equipment and/or installation services.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// Client who placed the order.
    pub client_id: Uuid,
    /// Human-facing sequential folio (e.g. "MS-000042").
    pub folio: String,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Sum of line totals before tax.
    pub subtotal: Decimal,
    /// IVA amount.
    pub tax_amount: Decimal,
    /// Grand total (subtotal + tax).
    pub total: Decimal,
    /// Total collected so far.
    pub amount_paid: Decimal,
    /// Remaining amount owed. Invariant: `balance_due == total - amount_paid`.
    pub balance_due: Decimal,
    /// Derived collection status.
    pub payment_status: PaymentStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Staff member who created the order.
    pub created_by: Uuid,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One line on an order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Parent order.
    pub order_id: Uuid,
    /// Catalog product sold.
    pub product_id: Uuid,
    /// Line description (snapshot of the product name at sale time).
    pub description: String,
    /// Units sold.
    pub quantity: i32,
    /// Price per unit at sale time.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub line_total: Decimal,
}

/// One line of a new order, as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    /// Catalog product.
    pub product_id: Uuid,
    /// Units.
    pub quantity: i32,
    /// Optional price override; defaults to the catalog price.
    pub unit_price: Option<Decimal>,
}

/// Data required to create an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    /// Client placing the order.
    pub client_id: Uuid,
    /// Order lines.
    pub items: Vec<NewOrderItem>,
    /// Notes.
    pub notes: Option<String>,
}
