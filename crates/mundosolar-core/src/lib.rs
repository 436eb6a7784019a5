//! # mundosolar-core
//!
//! Core crate for the MundoSolar business-management backend. Contains
//! configuration schemas, pagination/response types, and the unified
//! error system shared by every other crate.
//!
//! This crate has **no** internal dependencies on other MundoSolar crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
