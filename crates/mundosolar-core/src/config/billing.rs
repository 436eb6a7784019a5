//! Invoicing and tax configuration.

use serde::{Deserialize, Serialize};

/// Billing settings for order totals and CFDI invoice folios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// IVA tax rate applied to order subtotals, in percent.
    #[serde(default = "default_tax_rate")]
    pub tax_rate_percent: u32,
    /// Prefix for generated order folios.
    #[serde(default = "default_folio_prefix")]
    pub order_folio_prefix: String,
    /// Series letter for issued invoices.
    #[serde(default = "default_invoice_series")]
    pub invoice_series: String,
}

fn default_tax_rate() -> u32 {
    16
}

fn default_folio_prefix() -> String {
    "MS".to_string()
}

fn default_invoice_series() -> String {
    "A".to_string()
}
