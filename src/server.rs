//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, service wiring, and the Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;

use crate::application::services::{RateLimiter, ResolveService, ShortenService};
use crate::config::Config;
use crate::domain::store::KeyValueStore;
use crate::infrastructure::store::{InMemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - the key-value store (Redis, or the in-memory store when Redis is not
///   configured)
/// - rate limiter, shorten and resolve services
/// - the Axum HTTP server
///
/// # Errors
///
/// Returns an error if the Redis connection, server bind, or server runtime
/// fails. A configured-but-unreachable Redis is fatal rather than silently
/// downgraded: rate limiting must not run against an empty store.
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => Arc::new(RedisStore::connect(redis_url).await?),
        None => {
            tracing::warn!("Redis not configured, using in-memory store (data is not persistent)");
            Arc::new(InMemoryStore::new())
        }
    };

    let limiter = RateLimiter::new(
        Arc::clone(&store),
        config.api_quota,
        Duration::from_secs(config.rate_limit_window_secs),
    );

    let shorten_service = Arc::new(ShortenService::new(
        Arc::clone(&store),
        limiter,
        config.public_domain.clone(),
        config.default_expiry_hours,
    ));
    let resolve_service = Arc::new(ResolveService::new(Arc::clone(&store)));

    let state = AppState {
        shorten_service,
        resolve_service,
        store,
        public_domain: config.public_domain.clone(),
        behind_proxy: config.behind_proxy,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
