//! Redis-backed key-value store implementation.

use crate::domain::store::{KeyValueStore, Namespace, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::info;

/// Redis store for URL mappings and rate-limit counters.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Namespaces
/// are mapped to key prefixes on a single logical database, keeping mapping
/// ids and client keys from ever colliding.
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { conn: manager })
    }

    /// Constructs the full Redis key with the namespace prefix.
    fn build_key(ns: Namespace, key: &str) -> String {
        let prefix = match ns {
            Namespace::Mappings => "url:",
            Namespace::Counters => "rate:",
        };
        format!("{}{}", prefix, key)
    }
}

fn op_error(e: redis::RedisError) -> StoreError {
    if e.is_connection_refusal() || e.is_io_error() || e.is_timeout() {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Operation(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, ns: Namespace, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(Self::build_key(ns, key))
            .await
            .map_err(op_error)
    }

    async fn set(&self, ns: Namespace, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::build_key(ns, key), value, ttl.as_secs())
            .await
            .map_err(op_error)
    }

    async fn incr(&self, ns: Namespace, key: &str) -> StoreResult<i64> {
        let mut conn = self.conn.clone();
        conn.incr::<_, _, i64>(Self::build_key(ns, key), 1)
            .await
            .map_err(op_error)
    }

    async fn decr(&self, ns: Namespace, key: &str) -> StoreResult<i64> {
        let mut conn = self.conn.clone();
        conn.decr::<_, _, i64>(Self::build_key(ns, key), 1)
            .await
            .map_err(op_error)
    }

    async fn ttl(&self, ns: Namespace, key: &str) -> StoreResult<Option<Duration>> {
        let mut conn = self.conn.clone();
        let secs: i64 = conn
            .ttl(Self::build_key(ns, key))
            .await
            .map_err(op_error)?;

        // Redis reports -2 for a missing key and -1 for a key without expiry.
        if secs < 0 {
            Ok(None)
        } else {
            Ok(Some(Duration::from_secs(secs as u64)))
        }
    }

    async fn expire(&self, ns: Namespace, key: &str, ttl: Duration) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        conn.expire::<_, bool>(Self::build_key(ns, key), ttl.as_secs() as i64)
            .await
            .map_err(op_error)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
