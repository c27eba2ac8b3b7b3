//! Application services orchestrating the core behavior.

mod rate_limiter;
mod resolve_service;
mod shorten_service;

pub use rate_limiter::{Admission, QuotaStatus, RateLimiter};
pub use resolve_service::ResolveService;
pub use shorten_service::{DEFAULT_EXPIRY_HOURS, ShortenCommand, ShortenOutcome, ShortenService};
