//! Extractor for the rate-limit client key.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

use crate::state::AppState;
use crate::utils::client_ip::client_key;

/// Client identity for rate-limit accounting, resolved from the peer socket
/// address or, behind a trusted proxy, from forwarding headers.
///
/// Extraction never fails: requests with no resolvable address share one
/// "unknown" bucket rather than bypassing the limiter.
#[derive(Debug, Clone)]
pub struct ClientKey(pub String);

impl FromRequestParts<AppState> for ClientKey {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self(client_key(
            &parts.headers,
            peer,
            state.behind_proxy,
        )))
    }
}
