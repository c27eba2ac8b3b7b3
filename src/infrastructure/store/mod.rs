//! Key-value store implementations.
//!
//! - [`RedisStore`] - production Redis-backed store
//! - [`InMemoryStore`] - in-process store for tests and redis-less development

mod memory_store;
mod redis_store;

pub use memory_store::InMemoryStore;
pub use redis_store::RedisStore;
