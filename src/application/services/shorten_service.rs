//! Mapping creation service: validation, collision check, persistence.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::application::services::rate_limiter::{Admission, QuotaStatus, RateLimiter};
use crate::domain::entities::Mapping;
use crate::domain::store::{KeyValueStore, Namespace};
use crate::error::AppError;
use crate::utils::short_id::generate_id;
use crate::utils::url_guard::{is_self_referential, normalize_url};

/// Mapping lifetime applied when the caller sends no expiry (or zero).
pub const DEFAULT_EXPIRY_HOURS: u64 = 24;

const SECONDS_PER_HOUR: u64 = 3600;

/// Input for a shorten request.
#[derive(Debug, Clone)]
pub struct ShortenCommand {
    /// URL to shorten; scheme-less input is accepted and secured.
    pub url: String,
    /// Caller-chosen short id; empty or absent means generate one.
    pub custom_id: Option<String>,
    /// Mapping lifetime in hours; zero or absent means the default.
    pub expiry_hours: Option<u64>,
}

/// Result of a successful shorten request.
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    pub mapping: Mapping,
    pub quota: QuotaStatus,
}

/// Orchestrates mapping creation.
///
/// Runs the rate-limit admission, URL validation, the self-reference guard,
/// HTTPS enforcement, id assignment with a single collision check, and
/// persistence, in that order, short-circuiting on the first failure. No
/// partial mapping is ever written: all checks precede the single store
/// write.
pub struct ShortenService {
    store: Arc<dyn KeyValueStore>,
    limiter: RateLimiter,
    service_domain: String,
    default_expiry_hours: u64,
}

impl ShortenService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        limiter: RateLimiter,
        service_domain: String,
        default_expiry_hours: u64,
    ) -> Self {
        Self {
            store,
            limiter,
            service_domain,
            default_expiry_hours,
        }
    }

    /// Creates a new mapping for `client_key`.
    ///
    /// # Errors
    ///
    /// - [`AppError::RateLimited`] - quota exhausted for this window
    /// - [`AppError::Validation`] - not a valid absolute URL
    /// - [`AppError::DisallowedDomain`] - URL points back at this service
    /// - [`AppError::InUse`] - the id already maps to a URL
    /// - [`AppError::Storage`] - store unreachable
    pub async fn shorten(
        &self,
        command: ShortenCommand,
        client_key: &str,
    ) -> Result<ShortenOutcome, AppError> {
        if let Admission::Denied { reset_in } = self.limiter.admit(client_key).await? {
            return Err(AppError::rate_limited(reset_in.as_secs() / 60));
        }

        let original_url = normalize_url(&command.url).ok_or_else(|| {
            AppError::bad_request("Invalid URL", json!({ "url": command.url }))
        })?;

        if is_self_referential(&original_url, &self.service_domain) {
            return Err(AppError::disallowed_domain(
                "Shortening this domain is not allowed",
                json!({ "domain": self.service_domain }),
            ));
        }

        let id = match command.custom_id {
            Some(custom) if !custom.is_empty() => custom,
            _ => generate_id(),
        };

        // One existence check; generated ids are not retried on collision.
        if self.store.get(Namespace::Mappings, &id).await?.is_some() {
            return Err(AppError::in_use(
                "URL short already in use",
                json!({ "id": id }),
            ));
        }

        let expiry_hours = match command.expiry_hours {
            Some(hours) if hours > 0 => hours,
            _ => self.default_expiry_hours,
        };
        let ttl_secs = expiry_hours.checked_mul(SECONDS_PER_HOUR).ok_or_else(|| {
            AppError::bad_request("Expiry out of range", json!({ "expiry": expiry_hours }))
        })?;

        self.store
            .set(
                Namespace::Mappings,
                &id,
                &original_url,
                Duration::from_secs(ttl_secs),
            )
            .await?;

        let quota = self.limiter.consume(client_key).await?;

        Ok(ShortenOutcome {
            mapping: Mapping {
                id,
                original_url,
                expiry_hours,
            },
            quota,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::{MockKeyValueStore, StoreError};
    use crate::infrastructure::store::InMemoryStore;

    const WINDOW: Duration = Duration::from_secs(1800);

    fn service_with_store(store: Arc<dyn KeyValueStore>, quota: u32) -> ShortenService {
        let limiter = RateLimiter::new(Arc::clone(&store), quota, WINDOW);
        ShortenService::new(store, limiter, "localhost:3000".to_string(), 24)
    }

    fn command(url: &str) -> ShortenCommand {
        ShortenCommand {
            url: url.to_string(),
            custom_id: None,
            expiry_hours: None,
        }
    }

    #[tokio::test]
    async fn test_shorten_persists_and_reports_quota() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(Arc::clone(&store), 10);

        let outcome = service
            .shorten(command("https://example.com/page"), "1.2.3.4")
            .await
            .unwrap();

        assert_eq!(outcome.mapping.original_url, "https://example.com/page");
        assert_eq!(outcome.mapping.id.len(), 6);
        assert_eq!(outcome.mapping.expiry_hours, 24);
        assert_eq!(outcome.quota.remaining, 9);
        assert!(outcome.quota.reset_in > Duration::ZERO);

        let stored = store
            .get(Namespace::Mappings, &outcome.mapping.id)
            .await
            .unwrap();
        assert_eq!(stored.as_deref(), Some("https://example.com/page"));
    }

    #[tokio::test]
    async fn test_shorten_enforces_https() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(Arc::clone(&store), 10);

        let outcome = service
            .shorten(command("http://example.com"), "1.2.3.4")
            .await
            .unwrap();

        assert_eq!(outcome.mapping.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_shorten_rejects_invalid_url() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(store, 10);

        let result = service.shorten(command("ftp://example.com"), "1.2.3.4").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_rejects_own_domain() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(store, 10);

        let result = service
            .shorten(command("http://localhost:3000/xyz"), "1.2.3.4")
            .await;

        assert!(matches!(result, Err(AppError::DisallowedDomain { .. })));
    }

    #[tokio::test]
    async fn test_shorten_uses_custom_id() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(Arc::clone(&store), 10);

        let outcome = service
            .shorten(
                ShortenCommand {
                    url: "https://example.com".to_string(),
                    custom_id: Some("mylink".to_string()),
                    expiry_hours: None,
                },
                "1.2.3.4",
            )
            .await
            .unwrap();

        assert_eq!(outcome.mapping.id, "mylink");
    }

    #[tokio::test]
    async fn test_shorten_empty_custom_id_generates_one() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(store, 10);

        let outcome = service
            .shorten(
                ShortenCommand {
                    url: "https://example.com".to_string(),
                    custom_id: Some(String::new()),
                    expiry_hours: None,
                },
                "1.2.3.4",
            )
            .await
            .unwrap();

        assert_eq!(outcome.mapping.id.len(), 6);
    }

    #[tokio::test]
    async fn test_shorten_custom_expiry() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(Arc::clone(&store), 10);

        let outcome = service
            .shorten(
                ShortenCommand {
                    url: "https://example.com".to_string(),
                    custom_id: None,
                    expiry_hours: Some(48),
                },
                "1.2.3.4",
            )
            .await
            .unwrap();

        assert_eq!(outcome.mapping.expiry_hours, 48);

        let ttl = store
            .ttl(Namespace::Mappings, &outcome.mapping.id)
            .await
            .unwrap()
            .unwrap();
        assert!(ttl > Duration::from_secs(47 * 3600));
    }

    #[tokio::test]
    async fn test_shorten_oversized_expiry_is_rejected() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(Arc::clone(&store), 10);

        let result = service
            .shorten(
                ShortenCommand {
                    url: "https://example.com".to_string(),
                    custom_id: Some("huge42".to_string()),
                    expiry_hours: Some(u64::MAX),
                },
                "1.2.3.4",
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));

        // Nothing was persisted for the rejected request.
        let stored = store.get(Namespace::Mappings, "huge42").await.unwrap();
        assert_eq!(stored, None);
    }

    #[tokio::test]
    async fn test_shorten_zero_expiry_falls_back_to_default() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(store, 10);

        let outcome = service
            .shorten(
                ShortenCommand {
                    url: "https://example.com".to_string(),
                    custom_id: None,
                    expiry_hours: Some(0),
                },
                "1.2.3.4",
            )
            .await
            .unwrap();

        assert_eq!(outcome.mapping.expiry_hours, 24);
    }

    #[tokio::test]
    async fn test_shorten_conflict_performs_no_write() {
        let mut mock_store = MockKeyValueStore::new();

        // Limiter: first call for this client initializes the entry.
        mock_store
            .expect_get()
            .withf(|ns, _| *ns == Namespace::Counters)
            .times(1)
            .returning(|_, _| Ok(None));
        mock_store
            .expect_set()
            .withf(|ns, _, _, _| *ns == Namespace::Counters)
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        // Collision check finds the id taken; no mapping write may follow.
        mock_store
            .expect_get()
            .withf(|ns, key| *ns == Namespace::Mappings && key == "taken1")
            .times(1)
            .returning(|_, _| Ok(Some("https://other.example".to_string())));
        mock_store
            .expect_set()
            .withf(|ns, _, _, _| *ns == Namespace::Mappings)
            .times(0);

        let store: Arc<dyn KeyValueStore> = Arc::new(mock_store);
        let service = service_with_store(store, 10);

        let result = service
            .shorten(
                ShortenCommand {
                    url: "https://example.com".to_string(),
                    custom_id: Some("taken1".to_string()),
                    expiry_hours: None,
                },
                "1.2.3.4",
            )
            .await;

        assert!(matches!(result, Err(AppError::InUse { .. })));
    }

    #[tokio::test]
    async fn test_shorten_rate_limited_after_quota() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let service = service_with_store(store, 2);

        for i in 0..2 {
            service
                .shorten(command(&format!("https://example.com/{i}")), "1.2.3.4")
                .await
                .unwrap();
        }

        let result = service
            .shorten(command("https://example.com/last"), "1.2.3.4")
            .await;

        match result {
            Err(AppError::RateLimited {
                reset_in_minutes, ..
            }) => assert!(reset_in_minutes > 0),
            other => panic!("expected rate limit denial, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shorten_store_fault_surfaces_as_storage_error() {
        let mut mock_store = MockKeyValueStore::new();

        mock_store
            .expect_get()
            .withf(|ns, _| *ns == Namespace::Counters)
            .times(1)
            .returning(|_, _| Ok(None));
        mock_store
            .expect_set()
            .withf(|ns, _, _, _| *ns == Namespace::Counters)
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        mock_store
            .expect_get()
            .withf(|ns, _| *ns == Namespace::Mappings)
            .times(1)
            .returning(|_, _| Ok(None));
        mock_store
            .expect_set()
            .withf(|ns, _, _, _| *ns == Namespace::Mappings)
            .times(1)
            .returning(|_, _, _, _| Err(StoreError::Connection("refused".to_string())));

        let store: Arc<dyn KeyValueStore> = Arc::new(mock_store);
        let service = service_with_store(store, 10);

        let result = service.shorten(command("https://example.com"), "1.2.3.4").await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }
}
