//! Infrastructure layer: external system integrations.

pub mod store;
