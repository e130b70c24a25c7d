//! HTTP adapters - REST API implementations.

pub mod reasoning;

pub use reasoning::{app_router, cors_layer, reasoning_routes, ReasoningHandlers};
