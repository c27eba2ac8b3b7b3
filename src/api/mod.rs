//! API layer: REST handlers, DTOs, and middleware.

pub mod client_key;
pub mod dto;
pub mod handlers;
pub mod json;
pub mod middleware;
