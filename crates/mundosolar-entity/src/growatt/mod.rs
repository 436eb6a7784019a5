//! Growatt generation-data cache entity.

pub mod model;

pub use model::{CacheFreshness, GrowattDataCache};
