//! Access layer for the Yanoshin TDnet mirror.
//!
//! This module provides a rate-limited, retry-enabled fetcher and the raw
//! response types it returns.

pub mod fetcher;
#[cfg(test)]
pub(crate) mod mock;
pub mod rate_limiter;
pub mod transport;
pub mod types;

pub use fetcher::{HttpFetcher, RETRYABLE_STATUSES};
pub use rate_limiter::RateLimiter;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
pub use types::{RawDisclosure, RawItem};
