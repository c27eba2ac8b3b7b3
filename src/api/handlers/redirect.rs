//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// Responds with `301 Moved Permanently` and the stored URL in `Location`.
/// The global access counter bump happens inside the resolve service,
/// fire-and-forget.
///
/// # Errors
///
/// - **404** - id never written or its TTL elapsed
/// - **500** - store unreachable
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.resolve_service.resolve(&id).await?;

    metrics::counter!("redirects_total").increment(1);

    let location = HeaderValue::from_str(&original_url).map_err(|_| {
        AppError::storage(
            "Stored URL is not a valid redirect target",
            json!({ "id": id }),
        )
    })?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location)],
    ))
}
