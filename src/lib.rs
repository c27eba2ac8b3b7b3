//! # URL Service
//!
//! A fast and secure URL shortening service built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and the key-value store trait
//! - **Application Layer** ([`application`]) - Shorten/resolve orchestration and
//!   the rate limiter
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Short, URL-safe ids with optional custom ids and collision rejection
//! - TTL-based mapping expiry (24h default, caller-configurable)
//! - Per-client sliding-window rate limiting backed by the store
//! - HTTPS enforcement and a self-reference guard against redirect loops
//! - Best-effort global access counter on redirects
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export DOMAIN="localhost:3000"
//! export REDIS_URL="redis://localhost:6379"  # Optional, in-memory fallback
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RateLimiter, ResolveService, ShortenService};
    pub use crate::domain::entities::Mapping;
    pub use crate::domain::store::{KeyValueStore, Namespace};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
