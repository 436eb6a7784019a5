//! Product catalog and inventory management.

pub mod service;

pub use service::InventoryService;
