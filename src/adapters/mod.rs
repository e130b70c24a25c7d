//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Outbound AI providers and resilience wrappers
//! - `http` - Inbound REST endpoints (axum)

pub mod ai;
pub mod http;
