//! Payment entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How a payment was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash.
    Cash,
    /// Bank transfer (SPEI).
    Transfer,
    /// Credit/debit card.
    Card,
    /// Check.
    Check,
}

/// A payment received against an order. Each payment belongs to exactly
/// one order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// Order this payment applies to.
    pub order_id: Uuid,
    /// Amount received.
    pub amount: Decimal,
    /// How it was received.
    pub method: PaymentMethod,
    /// Bank/transaction reference.
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Staff member who registered the payment.
    pub received_by: Uuid,
    /// When the money was received.
    pub paid_at: DateTime<Utc>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    /// Amount received.
    pub amount: Decimal,
    /// How it was received.
    pub method: PaymentMethod,
    /// Bank/transaction reference.
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// When the money was received; defaults to now.
    pub paid_at: Option<DateTime<Utc>>,
}
