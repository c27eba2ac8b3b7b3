//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `DOMAIN` - the service's public domain (e.g. `s.example.com` or
//!   `localhost:3000`), used both for the self-reference guard and for
//!   composing returned short links
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` / `REDIS_HOST` - Redis connection; when neither is set the
//!   service falls back to the in-memory store (development only)
//! - `API_QUOTA` - shorten calls per client per window (default: 10)
//! - `RATE_LIMIT_WINDOW_SECS` - rate-limit window length (default: 1800)
//! - `DEFAULT_EXPIRY_HOURS` - mapping lifetime when the caller sends none
//!   (default: 24)
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - read client IP from proxy headers (default: false)

use anyhow::{Context, Result};
use std::env;

use crate::application::services::DEFAULT_EXPIRY_HOURS;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public domain used for self-reference rejection and short links.
    pub public_domain: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Shorten calls a client may make within one rate-limit window.
    pub api_quota: u32,
    /// Rate-limit window length in seconds.
    pub rate_limit_window_secs: u64,
    /// Mapping lifetime in hours applied when the caller sends none.
    pub default_expiry_hours: u64,
    /// When true, client identity is read from X-Forwarded-For / X-Real-IP.
    /// Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DOMAIN` is missing.
    pub fn from_env() -> Result<Self> {
        let public_domain = env::var("DOMAIN").context("DOMAIN must be set")?;

        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let api_quota = env::var("API_QUOTA")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let rate_limit_window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1800);

        let default_expiry_hours = env::var("DEFAULT_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXPIRY_HOURS);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            public_domain,
            redis_url,
            listen_addr,
            log_level,
            log_format,
            api_quota,
            rate_limit_window_secs,
            default_expiry_hours,
            behind_proxy,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = if let Some(pwd) = password {
            // Empty password means no authentication
            if pwd.is_empty() {
                format!("redis://{}:{}/{}", host, port, db)
            } else {
                format!("redis://:{}@{}:{}/{}", pwd, host, port, db)
            }
        } else {
            format!("redis://{}:{}/{}", host, port, db)
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `public_domain` is empty
    /// - `api_quota`, `rate_limit_window_secs`, or `default_expiry_hours` is zero
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` or the Redis URL scheme is invalid
    pub fn validate(&self) -> Result<()> {
        if self.public_domain.trim().is_empty() {
            anyhow::bail!("DOMAIN must not be empty");
        }

        if self.api_quota == 0 {
            anyhow::bail!("API_QUOTA must be at least 1");
        }

        if self.rate_limit_window_secs == 0 {
            anyhow::bail!("RATE_LIMIT_WINDOW_SECS must be greater than 0");
        }

        if self.default_expiry_hours == 0 {
            anyhow::bail!("DEFAULT_EXPIRY_HOURS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Public domain: {}", self.public_domain);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Redis: {}", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Redis: not configured (in-memory store)");
        }

        tracing::info!("  Rate limit: {} calls per {}s", self.api_quota, self.rate_limit_window_secs);
        tracing::info!("  Default expiry: {}h", self.default_expiry_hours);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
