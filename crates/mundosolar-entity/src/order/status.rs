//! Order lifecycle and payment status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Being put together; editable.
    Draft,
    /// Accepted by the client; stock committed.
    Confirmed,
    /// Goods delivered / installation done.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// How much of an order's total has been collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Nothing collected yet.
    Pending,
    /// Some, but not all, collected.
    Partial,
    /// Fully collected.
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Paid => "paid",
        };
        write!(f, "{s}")
    }
}
