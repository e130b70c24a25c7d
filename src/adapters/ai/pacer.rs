//! Process-wide minimum spacing between outbound AI calls.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Delays callers so that consecutive outbound calls start at least
/// `min_interval` apart. Callers wait; they are never rejected.
///
/// The lock is held across the wait so concurrent callers queue up instead
/// of reading the same stale timestamp.
#[derive(Debug)]
pub struct CallPacer {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl CallPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until this caller may send, then records the send time.
    ///
    /// Returns how long the caller waited.
    pub async fn wait_turn(&self) -> Duration {
        let mut last_call = self.last_call.lock().await;
        let now = Instant::now();

        let waited = match *last_call {
            Some(previous) if now < previous + self.min_interval => {
                let ready_at = previous + self.min_interval;
                let wait = ready_at - now;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "pacing outbound AI call");
                sleep_until(ready_at).await;
                wait
            }
            _ => Duration::ZERO,
        };

        *last_call = Some(Instant::now());
        waited
    }
}

impl Default for CallPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(4000))
    }
}
