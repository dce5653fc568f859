//! Tool-calling server exposing TDnet queries over JSON-RPC on stdio.

pub mod handlers;
pub mod protocol;
pub mod provider;
pub mod server;
pub mod tools;

pub use handlers::ToolHandlers;
pub use provider::ClientProvider;
pub use server::{serve_stdio, McpServer};
