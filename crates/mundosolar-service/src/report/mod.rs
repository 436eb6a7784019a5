//! Dashboard and sales reports.

pub mod dashboard;

pub use dashboard::{DashboardSummary, ReportService};
