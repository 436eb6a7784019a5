//! # mundosolar-auth
//!
//! Authentication primitives for MundoSolar: JWT encoding/decoding for
//! staff sessions, the separate client-portal token codec, Argon2
//! password hashing, and the centralized authorization policy.

pub mod jwt;
pub mod password;
pub mod policy;
pub mod portal;

pub use password::hasher::PasswordHasher;
pub use policy::{authorize, Action, Resource};
