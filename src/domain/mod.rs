//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (score value object, validation errors)
//! - `reasoning` - Pure rule-based reasoning analysis (classification, detection, scoring, templates)

pub mod foundation;
pub mod reasoning;
