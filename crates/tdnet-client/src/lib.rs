//! TDnet disclosure client library.
//!
//! This library fetches timely disclosures from the Yanoshin TDnet mirror,
//! normalizes them into [`Disclosure`] records and categorizes them by title.

pub mod api;
pub mod category;
pub mod client;
pub mod error;
pub mod models;
pub mod parser;

pub use api::{HttpFetcher, HttpResponse, RateLimiter, ReqwestTransport, Transport, TransportError};
pub use category::{categorize, Category};
pub use client::{
    clamp_limit, parse_iso_date, validate_code, TdnetClient, DEFAULT_LIMIT, MAX_LIMIT,
};
pub use error::{Result, TdnetError};
pub use models::{format_pubdate, Disclosure, DisclosureList, NewDisclosure, RecordError, PUBDATE_FORMAT};
