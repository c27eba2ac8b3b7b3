//! Short link mapping entity.

/// A stored association from a short id to an original URL.
///
/// Mappings are owned by the key-value store: created on a successful
/// shorten request, destroyed automatically when their TTL elapses, and
/// never mutated in between (an id collision is rejected, not overwritten).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// URL-safe short identifier.
    pub id: String,
    /// Absolute original URL, scheme normalized to HTTPS.
    pub original_url: String,
    /// Lifetime of the mapping in hours.
    pub expiry_hours: u64,
}
