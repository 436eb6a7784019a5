//! Request extractors.

pub mod auth;
pub mod pagination;

pub use auth::{AuthClient, AuthStaff};
pub use pagination::PaginationParams;
