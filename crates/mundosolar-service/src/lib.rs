//! # mundosolar-service
//!
//! Business logic services for MundoSolar. Each service owns one
//! aggregate's workflows and is handed its repositories (Arc-wrapped) by
//! the composition root. Handlers never touch repositories directly.

pub mod auth;
pub mod client;
pub mod context;
pub mod inventory;
pub mod invoice;
pub mod maintenance;
pub mod monitoring;
pub mod notification;
pub mod order;
pub mod report;
pub mod system;
pub mod user;

pub use context::{PortalContext, StaffContext};
