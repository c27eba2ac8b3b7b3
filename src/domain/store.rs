//! Key-value store abstraction shared by mappings and rate-limit counters.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Logical key namespace inside the store.
///
/// Mappings and numeric counters live in separate namespaces so a generated
/// short id can never collide with a client key or the global access counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Short id -> original URL mappings.
    Mappings,
    /// Per-client rate-limit entries and the global access counter.
    Counters,
}

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Namespaced key-value store with TTL semantics.
///
/// All durable state lives behind this trait: URL mappings, rate-limit
/// counters, and the global access counter. Implementations must be
/// thread-safe; faults are reported as [`StoreError`] and are never masked
/// (a limiter that cannot reach the store must deny with an error, not
/// silently admit).
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed production store
/// - [`crate::infrastructure::store::InMemoryStore`] - in-process store for tests
///   and redis-less development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetches the value stored at `key`, or `None` if the key is absent
    /// or its TTL has elapsed.
    async fn get(&self, ns: Namespace, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` at `key` with the given TTL, overwriting any
    /// previous value.
    async fn set(&self, ns: Namespace, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Increments the integer counter at `key` and returns the new value.
    /// A missing key counts as 0.
    async fn incr(&self, ns: Namespace, key: &str) -> StoreResult<i64>;

    /// Decrements the integer counter at `key` and returns the new value.
    /// A missing key counts as 0.
    async fn decr(&self, ns: Namespace, key: &str) -> StoreResult<i64>;

    /// Returns the remaining TTL for `key`, or `None` if the key is absent
    /// or has no expiry.
    async fn ttl(&self, ns: Namespace, key: &str) -> StoreResult<Option<Duration>>;

    /// Applies `ttl` to an existing key, replacing any previous expiry.
    /// Returns `false` when the key does not exist.
    async fn expire(&self, ns: Namespace, key: &str, ttl: Duration) -> StoreResult<bool>;

    /// Checks whether the store backend is reachable.
    async fn health_check(&self) -> bool;
}
