//! CFDI invoice management.

pub mod service;

pub use service::InvoiceService;
