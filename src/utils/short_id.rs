//! Short identifier generation.

use base64::Engine as _;

/// Length of a generated short id in characters.
pub const ID_LENGTH: usize = 6;

/// Random bytes drawn per id; base64 of 6 bytes yields 8 url-safe
/// characters, truncated to [`ID_LENGTH`].
const ID_BYTES: usize = 6;

/// Generates a random 6-character URL-safe short id.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding.
/// Uniqueness against existing store contents is not guaranteed here; the
/// collision check happens at mapping creation.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_id() -> String {
    let mut buffer = [0u8; ID_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut id = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    id.truncate(ID_LENGTH);
    id
}
