//! # mundosolar-entity
//!
//! Domain entity models for MundoSolar: staff users, clients and their
//! solar installations, the product catalog and inventory ledger, orders
//! with their payment ledger, CFDI invoices, the maintenance workflow,
//! notifications, the Growatt generation-data cache, and background jobs.

pub mod client;
pub mod growatt;
pub mod invoice;
pub mod job;
pub mod maintenance;
pub mod notification;
pub mod order;
pub mod product;
pub mod system;
pub mod user;
