//! # mundosolar-api
//!
//! HTTP API layer for MundoSolar: the axum router, request handlers,
//! DTOs, auth extractors for the two token audiences, and the mapping
//! from domain errors to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
