//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::client_key::ClientKey;
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::json::ApiJson;
use crate::application::services::ShortenCommand;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "http://example.com/page",
///   "short": "mylink",   // optional custom id
///   "expiry": 48         // optional lifetime in hours
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "short": "s.example.com/mylink",
///   "expiry": 48,
///   "rate_limit": 9,
///   "rate_limit_reset": 29
/// }
/// ```
///
/// # Errors
///
/// - **400** - malformed body, invalid URL, or invalid custom id
/// - **403** - short id already in use
/// - **503** - self-referential domain, or rate limit exceeded
/// - **500** - store unreachable
pub async fn shorten_handler(
    State(state): State<AppState>,
    ClientKey(client): ClientKey,
    ApiJson(payload): ApiJson<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let outcome = state
        .shorten_service
        .shorten(
            ShortenCommand {
                url: payload.url,
                custom_id: payload.short,
                expiry_hours: payload.expiry,
            },
            &client,
        )
        .await?;

    metrics::counter!("urls_shortened_total").increment(1);

    let short = format!(
        "{}/{}",
        state.public_domain.trim_end_matches('/'),
        outcome.mapping.id
    );

    Ok(Json(ShortenResponse {
        url: outcome.mapping.original_url,
        short,
        expiry: outcome.mapping.expiry_hours,
        rate_limit: outcome.quota.remaining,
        rate_limit_reset: outcome.quota.reset_in_minutes(),
    }))
}
