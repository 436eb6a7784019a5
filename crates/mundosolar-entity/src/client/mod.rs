//! Client (customer) entity.

pub mod model;

pub use model::{Client, CreateClient, UpdateClient};
