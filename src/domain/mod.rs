//! Domain layer: business entities and the store abstraction.

pub mod entities;
pub mod store;
