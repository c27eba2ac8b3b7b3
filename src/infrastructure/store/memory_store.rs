//! In-process key-value store with TTL semantics.

use crate::domain::store::{KeyValueStore, Namespace, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// In-memory store mirroring the Redis contract.
///
/// Backs the test suite and redis-less development. Expiry is lazy: entries
/// past their deadline are dropped when touched. Counter semantics follow
/// Redis: incr/decr on a missing key treats it as 0 and creates the key
/// without an expiry.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<(Namespace, String), Entry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn adjust(&self, ns: Namespace, key: &str, delta: i64) -> i64 {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        let now = Instant::now();
        let slot = (ns, key.to_string());

        let current = match entries.get(&slot) {
            Some(entry) if !entry.is_expired(now) => entry.value.parse::<i64>().unwrap_or(0),
            _ => 0,
        };
        let next = current + delta;

        let expires_at = entries
            .get(&slot)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.expires_at);

        entries.insert(
            slot,
            Entry {
                value: next.to_string(),
                expires_at,
            },
        );

        next
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, ns: Namespace, key: &str) -> StoreResult<Option<String>> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        let now = Instant::now();
        let slot = (ns, key.to_string());

        match entries.get(&slot) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(&slot);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, ns: Namespace, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(
            (ns, key.to_string()),
            Entry {
                value: value.to_string(),
                // A TTL too large for the clock never expires.
                expires_at: Instant::now().checked_add(ttl),
            },
        );
        Ok(())
    }

    async fn incr(&self, ns: Namespace, key: &str) -> StoreResult<i64> {
        Ok(self.adjust(ns, key, 1))
    }

    async fn decr(&self, ns: Namespace, key: &str) -> StoreResult<i64> {
        Ok(self.adjust(ns, key, -1))
    }

    async fn ttl(&self, ns: Namespace, key: &str) -> StoreResult<Option<Duration>> {
        let entries = self.entries.lock().expect("store lock poisoned");
        let now = Instant::now();

        Ok(entries
            .get(&(ns, key.to_string()))
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.expires_at)
            .map(|deadline| deadline - now))
    }

    async fn expire(&self, ns: Namespace, key: &str, ttl: Duration) -> StoreResult<bool> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        let now = Instant::now();

        match entries.get_mut(&(ns, key.to_string())) {
            Some(entry) if !entry.is_expired(now) => {
                entry.expires_at = now.checked_add(ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
