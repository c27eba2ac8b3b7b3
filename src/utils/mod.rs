//! Shared helpers: id generation, URL guarding, client identity.

pub mod client_ip;
pub mod short_id;
pub mod url_guard;
