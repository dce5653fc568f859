//! Connection resource behind the fetcher.
//!
//! [`ReqwestTransport`] creates its `reqwest::Client` on first use and drops it
//! on [`Transport::close`]; a later request creates a fresh one.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A request that did not produce a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Connection(String),
}

/// Issues a single GET; retry policy lives in the fetcher
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;

    /// Release the underlying connection; must be idempotent
    async fn close(&self);
}

/// Production transport backed by reqwest
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    client: Mutex<Option<Client>>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a connection pool currently exists
    pub async fn is_open(&self) -> bool {
        self.client.lock().await.is_some()
    }

    async fn client(&self) -> Result<Client, TransportError> {
        let mut guard = self.client.lock().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("tdnet-disclosure/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("HTTP client created");
        *guard = Some(client.clone());
        Ok(client)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let client = self.client().await?;

        let response = client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse { status, body })
    }

    async fn close(&self) {
        if self.client.lock().await.take().is_some() {
            tracing::debug!("HTTP client closed");
        }
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else {
        TransportError::Connection(error.to_string())
    }
}
