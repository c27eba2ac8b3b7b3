//! Client identity resolution for rate limiting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Fallback identity when no address information is available at all.
const UNKNOWN_CLIENT: &str = "unknown";

/// Resolves the client key used for rate-limit accounting.
///
/// With `behind_proxy` set, `X-Forwarded-For` (first hop) and `X-Real-IP`
/// take priority over the peer socket address; enable only behind a trusted
/// reverse proxy, since the headers are client-controlled otherwise.
/// Without it, the peer address wins and the headers are a last resort.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> String {
    let from_headers = forwarded_ip(headers);
    let from_peer = peer.map(|addr| addr.ip().to_string());

    let resolved = if behind_proxy {
        from_headers.or(from_peer)
    } else {
        from_peer.or(from_headers)
    };

    resolved.unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Extracts a client IP from proxy headers, if present.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get("x-forwarded-for")
        && let Ok(raw) = value.to_str()
    {
        let first = raw.split(',').next().unwrap_or(raw).trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    if let Some(value) = headers.get("x-real-ip")
        && let Ok(raw) = value.to_str()
    {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    None
}
