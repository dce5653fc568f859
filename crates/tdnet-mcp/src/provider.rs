//! Shared client for tool handlers.

use shared::TdnetConfig;
use std::sync::Arc;
use tdnet_client::TdnetClient;
use tokio::sync::Mutex;
use tracing::debug;

/// Creates the [`TdnetClient`] on first use and hands out shared references.
///
/// Concurrent first calls observe a single client.
pub struct ClientProvider {
    config: TdnetConfig,
    client: Mutex<Option<Arc<TdnetClient>>>,
}

impl ClientProvider {
    pub fn new(config: TdnetConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
        }
    }

    /// Provider that starts out holding `client`
    pub fn from_client(config: TdnetConfig, client: TdnetClient) -> Self {
        Self {
            config,
            client: Mutex::new(Some(Arc::new(client))),
        }
    }

    pub async fn get(&self) -> Arc<TdnetClient> {
        let mut guard = self.client.lock().await;
        match guard.as_ref() {
            Some(client) => Arc::clone(client),
            None => {
                debug!(base_url = %self.config.base_url, "Creating TDnet client");
                let client = Arc::new(TdnetClient::new(&self.config));
                *guard = Some(Arc::clone(&client));
                client
            }
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.client.lock().await.is_some()
    }

    /// Close and forget the client; the next `get` creates a new one
    pub async fn shutdown(&self) {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            debug!("Closing TDnet client");
            client.close().await;
        }
    }
}
