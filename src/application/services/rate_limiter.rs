//! Sliding-window rate limiter backed by the key-value store.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::store::{KeyValueStore, Namespace, StoreResult};

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allowed { remaining: i64 },
    Denied { reset_in: Duration },
}

/// Current quota state for a client, reported back to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaStatus {
    /// Calls left in the current window.
    pub remaining: i64,
    /// Time until the window resets.
    pub reset_in: Duration,
}

impl QuotaStatus {
    /// Reset time in whole minutes, fraction truncated.
    pub fn reset_in_minutes(&self) -> u64 {
        self.reset_in.as_secs() / 60
    }
}

/// Tracks a remaining-call counter per client key in the store.
///
/// A client's first request creates its entry with the full quota and the
/// window TTL; the entry expires with the window and the next request starts
/// a fresh one. Admission and consumption are two separate store round
/// trips, so concurrent requests from one client can race past the check
/// before either consumes. The raw counter may then dip below zero; the
/// limiter denies at zero regardless, so the race only ever over-admits by
/// the number of in-flight duplicates.
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    quota: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KeyValueStore>, quota: u32, window: Duration) -> Self {
        Self {
            store,
            quota,
            window,
        }
    }

    /// Decides whether a request from `client_key` may proceed.
    ///
    /// The first call inside a window initializes the entry without
    /// consuming a unit; callers decrement via [`Self::consume`] after
    /// successful processing.
    ///
    /// # Errors
    ///
    /// Store faults propagate as [`crate::domain::store::StoreError`] and
    /// must never be treated as an admission.
    pub async fn admit(&self, client_key: &str) -> StoreResult<Admission> {
        match self.store.get(Namespace::Counters, client_key).await? {
            None => {
                self.store
                    .set(
                        Namespace::Counters,
                        client_key,
                        &self.quota.to_string(),
                        self.window,
                    )
                    .await?;

                Ok(Admission::Allowed {
                    remaining: i64::from(self.quota),
                })
            }
            Some(value) => {
                // A non-numeric counter denies rather than resetting quota.
                let remaining = value.parse::<i64>().unwrap_or(0);

                if remaining <= 0 {
                    let reset_in = self
                        .store
                        .ttl(Namespace::Counters, client_key)
                        .await?
                        .unwrap_or_default();

                    Ok(Admission::Denied { reset_in })
                } else {
                    Ok(Admission::Allowed { remaining })
                }
            }
        }
    }

    /// Consumes one quota unit after successful processing and reports the
    /// client's current state.
    ///
    /// If the window entry expired between [`Self::admit`] and this call,
    /// the decrement recreates it as a key with no expiry; the window TTL is
    /// re-applied so the client is not locked out past the window.
    pub async fn consume(&self, client_key: &str) -> StoreResult<QuotaStatus> {
        let remaining = self.store.decr(Namespace::Counters, client_key).await?;
        let reset_in = match self.store.ttl(Namespace::Counters, client_key).await? {
            Some(ttl) => ttl,
            None => {
                self.store
                    .expire(Namespace::Counters, client_key, self.window)
                    .await?;
                self.window
            }
        };

        Ok(QuotaStatus {
            remaining,
            reset_in,
        })
    }
}
