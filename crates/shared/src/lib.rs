//! Shared library for the TDnet disclosure tools.
//!
//! This crate provides common functionality used across the binary crates:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{Config, LoggingConfig, RateLimitConfig, TdnetConfig};
pub use logging::LogConfig;
