//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that form the vocabulary
//! of the reasoning domain.

mod errors;
mod score;

pub use errors::ValidationError;
pub use score::Score;
