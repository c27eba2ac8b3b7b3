use std::sync::Arc;

use crate::application::services::{ResolveService, ShortenService};
use crate::domain::store::KeyValueStore;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub resolve_service: Arc<ResolveService>,
    /// Kept for the health endpoint's reachability check.
    pub store: Arc<dyn KeyValueStore>,
    /// Public domain used to compose returned short links.
    pub public_domain: String,
    /// When true, client identity is read from proxy headers first.
    pub behind_proxy: bool,
}
