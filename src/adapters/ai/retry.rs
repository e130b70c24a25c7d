//! Retry policy with capped exponential backoff and symmetric jitter.

use rand::Rng;
use std::time::Duration;

/// Statuses worth another attempt.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry configuration for outbound AI calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, before jitter.
    pub base_delay: Duration,
    /// Upper bound on the un-jittered delay.
    pub max_delay: Duration,
    /// Jitter as a fraction of the delay, applied in both directions.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
            jitter: 0.25,
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Delay after failed attempt `attempt` (0-indexed).
    ///
    /// `min(base * 2^attempt, max)` scaled by `1 + jitter * (2 * sample - 1)`,
    /// where `sample` lies in `[0, 1)`.
    pub fn delay_for(&self, attempt: u32, sample: f64) -> Duration {
        let exponential = self.base_delay.as_millis() as f64 * 2f64.powi(attempt.min(30) as i32);
        let capped = exponential.min(self.max_delay.as_millis() as f64);
        let offset = capped * self.jitter * (2.0 * sample.clamp(0.0, 1.0) - 1.0);
        Duration::from_millis((capped + offset).max(0.0).floor() as u64)
    }

    /// Jittered delay drawn from `rng`.
    pub fn backoff<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        self.delay_for(attempt, rng.gen::<f64>())
    }

    /// True when another attempt is allowed after `attempt` failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    pub fn is_retryable_status(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }
}
