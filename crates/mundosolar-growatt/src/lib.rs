//! # mundosolar-growatt
//!
//! Client for the Growatt monitoring vendor API: the legacy login
//! password transform, session login, and per-plant generation metrics.
//! All persistence of the fetched data lives elsewhere (the cache table
//! owned by `mundosolar-database`).

pub mod client;
pub mod legacy;
pub mod types;

pub use client::GrowattClient;
pub use types::{GrowattPlant, GrowattSession};
