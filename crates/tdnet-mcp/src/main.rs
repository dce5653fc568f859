//! Standalone tool server binary.

use anyhow::{Context, Result};
use clap::Parser;
use shared::{Config, LogConfig};
use std::path::PathBuf;

/// TDNET tool server speaking JSON-RPC on stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "tdnet-mcp", author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tdnet.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let mut log_config = LogConfig::from_settings("tdnet-mcp", &config.logging);
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    tdnet_mcp::serve_stdio(config.tdnet).await
}
