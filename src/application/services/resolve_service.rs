//! Mapping lookup service for redirect handling.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::store::{KeyValueStore, Namespace};
use crate::error::AppError;

/// Key of the global access counter in the counters namespace.
const ACCESS_COUNTER_KEY: &str = "counter";

/// Resolves short ids back to their original URLs.
pub struct ResolveService {
    store: Arc<dyn KeyValueStore>,
}

impl ResolveService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Looks up the original URL for `id`.
    ///
    /// On a hit, the global access counter is incremented fire-and-forget:
    /// the increment runs on a spawned task and its failure is logged, never
    /// surfaced to the caller.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - id never written or its TTL elapsed
    /// - [`AppError::Storage`] - store unreachable
    pub async fn resolve(&self, id: &str) -> Result<String, AppError> {
        match self.store.get(Namespace::Mappings, id).await? {
            None => Err(AppError::not_found(
                "short not found",
                json!({ "id": id }),
            )),
            Some(original_url) => {
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    if let Err(e) = store.incr(Namespace::Counters, ACCESS_COUNTER_KEY).await {
                        warn!("Failed to increment access counter: {}", e);
                    }
                });

                Ok(original_url)
            }
        }
    }
}
