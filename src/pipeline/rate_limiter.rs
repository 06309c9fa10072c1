/*!
 * Outbound request rate limiting.
 *
 * Grants are spaced evenly at `1 / rate` seconds, which bounds any rolling
 * one-second window to at most `rate` grants. Callers queue on a fair async
 * mutex to reserve the next free slot and sleep outside the lock until the
 * slot arrives, so grant order follows arrival order at the limiter.
 */

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::errors::PipelineError;

/// Token dispenser enforcing a sustained requests-per-second cap.
///
/// Safe for use by any number of concurrent workers; the next-slot
/// reservation is the only shared state and is guarded by the mutex.
pub struct RateLimiter {
    /// Minimum spacing between grants
    interval: Duration,
    /// When the next grant may be handed out
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter for `rate` requests per second.
    ///
    /// Fails fast with `InvalidConfig` for non-positive or non-finite
    /// rates rather than blocking callers forever.
    pub fn new(rate: f64) -> Result<Self, PipelineError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "rate limit must be positive, got {}",
                rate
            )));
        }
        Ok(Self {
            interval: Duration::from_secs_f64(1.0 / rate),
            next_slot: Mutex::new(None),
        })
    }

    /// Wait until a request may be sent. Never fails.
    pub async fn acquire(&self) {
        let scheduled = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let scheduled = match *next_slot {
                Some(at) if at > now => at,
                _ => now,
            };
            *next_slot = Some(scheduled + self.interval);
            scheduled
        };
        tokio::time::sleep_until(scheduled).await;
    }

    /// Spacing between grants.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
