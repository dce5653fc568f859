//! Configuration management for the TDnet disclosure tools.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Upstream API settings
    #[serde(default)]
    pub tdnet: TdnetConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory path (used only when file output is enabled)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output (always written to stderr)
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Yanoshin TDnet mirror configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TdnetConfig {
    /// Base URL of the list endpoint, without trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,

    /// Total attempts per logical request, including the first one
    pub max_attempts: u32,

    /// Base delay for retry in milliseconds (doubled on every retry)
    pub retry_delay_ms: u64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per second
    pub requests_per_second: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "warn".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for TdnetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://webapi.yanoshin.jp/webapi/tdnet/list".to_string(),
            timeout_secs: 30,
            rate_limit: RateLimitConfig::default(),
            max_attempts: 3,
            retry_delay_ms: 2000,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 1.0,
        }
    }
}

impl TdnetConfig {
    /// Per-request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base retry delay as a `Duration`
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }
}
