//! CFDI invoice entity.

pub mod model;

pub use model::{CreateInvoice, Invoice, InvoiceStatus};
