//! Score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A heuristic reasoning score between 0 and 100 inclusive.
///
/// Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One hundred.
    pub const MAX: Self = Self(100);

    /// Creates a new Score, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: i32) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    /// Clamps a raw heuristic value into `[min, max]` (itself within 0..=100).
    pub fn clamped(value: i32, min: u8, max: u8) -> Self {
        let min = i32::from(min.min(100));
        let max = i32::from(max.min(100)).max(min);
        Self(value.clamp(min, max) as u8)
    }

    /// Rounds a floating point value half away from zero and clamps to 0..=100.
    ///
    /// Non-finite input maps to zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
