//! DTOs for the shorten endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom short id validation.
static CUSTOM_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").unwrap());

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten; scheme-less input is accepted.
    pub url: String,

    /// Optional custom short id. Empty means "generate one".
    #[validate(length(max = 32, message = "Custom short id must be at most 32 characters"))]
    #[validate(regex(
        path = "*CUSTOM_ID_REGEX",
        message = "Custom short id may only contain letters, digits, '-' and '_'"
    ))]
    pub short: Option<String>,

    /// Mapping lifetime in hours. Zero or absent means the 24h default.
    #[validate(range(max = 87600, message = "Expiry must be at most 87600 hours"))]
    pub expiry: Option<u64>,
}

/// Response for a successfully shortened URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Stored original URL, scheme normalized to HTTPS.
    pub url: String,
    /// Full short link, prefixed with the service's public domain.
    pub short: String,
    /// Mapping lifetime in hours.
    pub expiry: u64,
    /// Shorten calls left in the current rate-limit window.
    pub rate_limit: i64,
    /// Minutes until the rate-limit window resets.
    pub rate_limit_reset: u64,
}
