//! Maintenance workflow and technician availability.

pub mod availability;
pub mod service;

pub use availability::{AvailabilityService, HourlySlot};
pub use service::MaintenanceService;
