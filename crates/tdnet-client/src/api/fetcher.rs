//! Rate-limited GET with timeout, retry and exponential backoff.

use super::rate_limiter::RateLimiter;
use super::transport::{Transport, TransportError};
use crate::error::{Result, TdnetError};
use serde_json::Value;
use shared::TdnetConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Statuses treated as transient
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Issues one logical GET against the mirror
pub struct HttpFetcher {
    /// Base URL of the list endpoint
    base_url: String,
    /// Connection resource
    transport: Arc<dyn Transport>,
    /// Spacing between attempts, shared by every call
    rate_limiter: RateLimiter,
    /// Per-attempt timeout
    timeout: Duration,
    /// Total attempts, including the first
    max_attempts: u32,
    /// Base delay for retry (exponential backoff)
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &TdnetConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
            rate_limiter: RateLimiter::new(config.rate_limit.requests_per_second),
            timeout: config.timeout(),
            max_attempts: config.max_attempts.max(1),
            retry_delay: config.retry_delay(),
        }
    }

    pub fn url_for(&self, selector: &str) -> String {
        format!("{}/{}.json", self.base_url, selector)
    }

    /// Delay before the attempt following failed attempt `attempt` (0-indexed)
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay * 2u32.saturating_pow(attempt)
    }

    /// GET `{base_url}/{selector}.json` and decode the JSON body
    pub async fn fetch(&self, selector: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.url_for(selector);
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            // Apply rate limiting before each attempt
            self.rate_limiter.wait().await;

            debug!(url = %url, attempt = attempt + 1, "Making API request");

            let failure = match self.transport.get(&url, params, self.timeout).await {
                Ok(response) if response.is_success() => {
                    return serde_json::from_str(&response.body).map_err(|e| {
                        warn!(url = %url, error = %e, "Failed to parse response");
                        TdnetError::Request {
                            url: url.clone(),
                            status: Some(response.status),
                            reason: format!("invalid JSON body: {}", e),
                        }
                    });
                }
                Ok(response) if RETRYABLE_STATUSES.contains(&response.status) => {
                    warn!(url = %url, status = response.status, "Transient failure status");
                    TdnetError::Request {
                        url: url.clone(),
                        status: Some(response.status),
                        reason: format!("HTTP {}", response.status),
                    }
                }
                Ok(response) => {
                    warn!(url = %url, status = response.status, "Request failed");
                    return Err(TdnetError::Request {
                        url,
                        status: Some(response.status),
                        reason: format!("HTTP {}", response.status),
                    });
                }
                Err(TransportError::Timeout(message)) => {
                    warn!(url = %url, error = %message, "Request timed out");
                    TdnetError::Timeout {
                        url: url.clone(),
                        attempts: attempt + 1,
                    }
                }
                Err(TransportError::Connection(message)) => {
                    warn!(url = %url, error = %message, "Request error");
                    return Err(TdnetError::Request {
                        url,
                        status: None,
                        reason: message,
                    });
                }
            };

            last_error = Some(failure);

            if attempt + 1 < self.max_attempts {
                let delay = self.backoff(attempt);
                debug!(delay_ms = delay.as_millis() as u64, "Retrying after delay");
                sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| TdnetError::Request {
            url,
            status: None,
            reason: "no attempt was made".to_string(),
        }))
    }
}
