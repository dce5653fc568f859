//! Minimum-spacing rate limiter shared by every request of a client.
//!
//! The check-and-update of the last permission time happens under an async
//! mutex that is held across the sleep, so concurrent callers are let through
//! one at a time.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Rate limiter enforcing `1 / rate` seconds between permitted requests
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum spacing between two permissions
    min_interval: Duration,
    /// When the previous request was permitted
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter allowing `max_per_second` requests per second.
    ///
    /// A non-positive or non-finite rate disables spacing. A rate so small
    /// that its interval does not fit a `Duration` saturates at `Duration::MAX`.
    pub fn new(max_per_second: f64) -> Self {
        let min_interval = if max_per_second.is_finite() && max_per_second > 0.0 {
            Duration::try_from_secs_f64(1.0 / max_per_second).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };

        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request can be made, then record the permission time
    pub async fn wait(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!(
                    wait_ms = wait_time.as_millis() as u64,
                    "Rate limit: waiting before next request"
                );
                sleep(wait_time).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(1.0)
    }
}
