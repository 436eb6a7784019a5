//! Growatt cache reader.

pub mod service;

pub use service::{CachedGeneration, MonitoringService};
