//! Orders and the payment ledger.

pub mod service;

pub use service::{OrderDetail, OrderService, PaymentResult};
