//! URL validation, HTTPS enforcement, and the self-reference guard.

use url::Url;

/// Validates `raw` as an absolute URL and normalizes its scheme to HTTPS.
///
/// Accepted inputs:
/// - `https://...` - kept as-is
/// - `http://...` - scheme rewritten to `https://`
/// - scheme-less (`example.com/path`) - prefixed with `https://`
///
/// The rewrite is textual: only the scheme changes, the rest of the URL is
/// untouched. Any other explicit scheme is rejected.
///
/// Returns `None` when the result does not parse as a URL with a host.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let secured = if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("https://{rest}")
    } else if trimmed.starts_with("https://") {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return None;
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&secured).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(secured),
        _ => None,
    }
}

/// Reports whether a normalized URL points back at the service itself.
///
/// Compares the URL's `host[:port]` against the configured public domain,
/// with scheme and `www.` prefixes stripped on both sides. Shortening the
/// service's own domain would produce an infinite redirect loop.
pub fn is_self_referential(normalized_url: &str, service_domain: &str) -> bool {
    let Ok(parsed) = Url::parse(normalized_url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    let authority = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    strip_domain(&authority) == strip_domain(service_domain)
}

/// Reduces a domain string to its bare `host[:port]` form.
fn strip_domain(domain: &str) -> &str {
    let domain = domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let domain = domain.strip_prefix("www.").unwrap_or(domain);
    domain.split('/').next().unwrap_or(domain)
}
