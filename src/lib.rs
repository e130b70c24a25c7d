//! Decision Lens - reasoning analysis for personal decisions
//!
//! Scores a user's explanation of a decision, challenges their thinking, asks
//! clarifying questions and writes a neutral explanation. Each operation tries
//! an AI provider first and falls back to a deterministic rule engine.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
