//! Server loop handling JSON-RPC messages, one per line.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use shared::TdnetConfig;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::handlers::ToolHandlers;
use crate::protocol::*;
use crate::provider::ClientProvider;
use crate::tools::{get_tools, INSTRUCTIONS};

const PREVIEW_CHARS: usize = 100;

pub struct McpServer {
    provider: Arc<ClientProvider>,
    handlers: ToolHandlers,
}

impl McpServer {
    pub fn new(provider: Arc<ClientProvider>) -> Self {
        Self {
            handlers: ToolHandlers::new(Arc::clone(&provider)),
            provider,
        }
    }

    /// Serve until `reader` reaches EOF, then shut the client down
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Tool server started, waiting for messages");

        let mut lines = reader.lines();
        let outcome = async {
            while let Some(line) = lines.next_line().await.context("Failed to read request")? {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(message = %preview(line), "<-");

                let Some(response) = self.handle(line).await else {
                    continue;
                };
                let out = serde_json::to_string(&response)?;
                debug!(message = %preview(&out), "->");

                writer.write_all(out.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Ok::<_, anyhow::Error>(())
        }
        .await;

        info!("Tool server shutting down");
        self.provider.shutdown().await;
        outcome
    }

    /// Handle one message; notifications produce no response
    pub async fn handle(&self, msg: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(msg) {
            Ok(v) => v,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };
        let req = match JsonRpcRequest::deserialize(&raw) {
            Ok(r) if r.jsonrpc == "2.0" => r,
            Ok(r) => {
                return Some(JsonRpcResponse::error(
                    r.id,
                    INVALID_REQUEST,
                    format!("Unsupported jsonrpc version: {}", r.jsonrpc),
                ))
            }
            Err(e) => {
                let id = raw.get("id").cloned();
                return Some(JsonRpcResponse::error(id, INVALID_REQUEST, e.to_string()));
            }
        };

        if req.is_notification() {
            debug!(method = %req.method, "Notification received");
            return None;
        }

        let id = req.id.clone();
        let result = match req.method.as_str() {
            "initialize" => serde_json::to_value(initialize_result()),
            "tools/list" => serde_json::to_value(ToolsListResult { tools: get_tools() }),
            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()))
                    }
                };
                info!(tool = %params.name, "Calling tool");
                let result = self.handlers.handle(&params.name, params.arguments).await;
                serde_json::to_value(result)
            }
            "ping" => Ok(Value::Object(Default::default())),
            _ => {
                return Some(JsonRpcResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Unknown method: {}", req.method),
                ))
            }
        };

        Some(match result {
            Ok(v) => JsonRpcResponse::success(id, v),
            Err(e) => {
                JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e))
            }
        })
    }
}

fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: PROTOCOL_VERSION.into(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: SERVER_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
        },
        instructions: INSTRUCTIONS.into(),
    }
}

fn preview(message: &str) -> String {
    if message.chars().count() > PREVIEW_CHARS {
        let head: String = message.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

/// Serve on stdin/stdout with a lazily created client
pub async fn serve_stdio(config: TdnetConfig) -> Result<()> {
    let provider = Arc::new(ClientProvider::new(config));
    let server = McpServer::new(provider);
    server
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
