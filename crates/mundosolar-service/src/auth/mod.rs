//! Authentication services for staff and portal logins.

pub mod service;

pub use service::{AuthService, PortalLoginResult, StaffLoginResult};
