//! Invoice entity model.
//!
//! Only the CFDI lifecycle metadata lives here; the cryptographic stamping
//! itself is performed by an external authorized provider (PAC).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// CFDI lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Issued locally, not yet stamped by the PAC.
    Draft,
    /// Stamped; fiscal UUID assigned.
    Stamped,
    /// Cancelled before the tax authority.
    Cancelled,
}

/// A CFDI invoice issued for an order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    /// Unique invoice identifier.
    pub id: Uuid,
    /// Invoiced order.
    pub order_id: Uuid,
    /// Billed client.
    pub client_id: Uuid,
    /// Invoice series letter.
    pub series: String,
    /// Sequential folio within the series.
    pub folio: i64,
    /// SAT "uso de CFDI" code (e.g. "G03").
    pub cfdi_use: String,
    /// SAT "forma de pago" code (e.g. "03" transfer).
    pub payment_form: String,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Fiscal UUID assigned by the PAC when stamped.
    pub fiscal_uuid: Option<Uuid>,
    /// Invoice total (snapshot of the order total).
    pub total: Decimal,
    /// When the PAC stamped the invoice.
    pub stamped_at: Option<DateTime<Utc>>,
    /// When the invoice was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Check if the invoice still counts against the order.
    pub fn is_live(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Cancelled)
    }
}

/// Data required to issue an invoice for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoice {
    /// Order to invoice.
    pub order_id: Uuid,
    /// SAT "uso de CFDI" code.
    pub cfdi_use: String,
    /// SAT "forma de pago" code.
    pub payment_form: String,
}
