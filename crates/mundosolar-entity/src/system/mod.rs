//! Installed solar system entity.

pub mod model;

pub use model::{CreateSolarSystem, SolarSystem};
