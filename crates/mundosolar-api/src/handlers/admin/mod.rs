//! Admin-only handlers.

pub mod jobs;
pub mod users;
