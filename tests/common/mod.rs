#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use url_service::application::services::{RateLimiter, ResolveService, ShortenService};
use url_service::domain::store::KeyValueStore;
use url_service::infrastructure::store::InMemoryStore;
use url_service::state::AppState;

pub const TEST_DOMAIN: &str = "localhost:3000";

/// Builds an application state wired to a fresh in-memory store.
///
/// The store is also returned so tests can seed mappings and inspect
/// counters directly.
pub fn create_test_state(quota: u32, window: Duration) -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let store_dyn: Arc<dyn KeyValueStore> = store.clone();

    let limiter = RateLimiter::new(Arc::clone(&store_dyn), quota, window);
    let shorten_service = Arc::new(ShortenService::new(
        Arc::clone(&store_dyn),
        limiter,
        TEST_DOMAIN.to_string(),
        24,
    ));
    let resolve_service = Arc::new(ResolveService::new(Arc::clone(&store_dyn)));

    let state = AppState {
        shorten_service,
        resolve_service,
        store: store_dyn,
        public_domain: TEST_DOMAIN.to_string(),
        behind_proxy: false,
    };

    (state, store)
}

/// State with a quota high enough that tests not about rate limiting
/// never hit it.
pub fn default_test_state() -> (AppState, Arc<InMemoryStore>) {
    create_test_state(100, Duration::from_secs(1800))
}
