//! TDnet disclosure CLI application.

mod error;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shared::{Config, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tdnet_client::{parse_iso_date, TdnetClient};
use tracing::debug;

use crate::error::CliError;
use crate::output::{render_json, render_text, Listing};

/// TDNET Disclosure - Japanese timely disclosure tool
#[derive(Parser, Debug)]
#[command(name = "tdnet", author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "tdnet.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show version information
    Version,

    /// Get latest disclosures
    Latest {
        /// Maximum results
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        /// Output as JSON
        #[arg(short, long)]
        json_output: bool,
    },

    /// Search disclosures by keyword
    Search {
        keyword: String,

        /// Maximum results
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Output as JSON
        #[arg(short, long)]
        json_output: bool,
    },

    /// Get disclosures for a specific company (by stock code)
    Company {
        code: String,

        /// Maximum results
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        /// Output as JSON
        #[arg(short, long)]
        json_output: bool,
    },

    /// Get disclosures for a specific date (YYYY-MM-DD)
    ByDate {
        target_date: String,

        /// Output as JSON
        #[arg(short, long)]
        json_output: bool,
    },

    /// Get disclosures between two dates, inclusive (YYYY-MM-DD)
    Range {
        start_date: String,
        end_date: String,

        /// Output as JSON
        #[arg(short, long)]
        json_output: bool,
    },

    /// Test TDNET API connection
    Test,

    /// Start the tool server on stdio
    Serve,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let mut log_config = LogConfig::from_settings("tdnet-cli", &config.logging);
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    debug!(config_file = %args.config.display(), "Loaded configuration");

    match args.command {
        Command::Version => {
            println!("tdnet-disclosure {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve => {
            tdnet_mcp::serve_stdio(config.tdnet).await?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let client = TdnetClient::new(&config.tdnet);
            let result = execute(&client, command).await;
            client.close().await;
            result
        }
    }
}

async fn execute(client: &TdnetClient, command: Command) -> Result<ExitCode, CliError> {
    let rendered = match command {
        Command::Latest { limit, json_output } => {
            let result = client.get_recent(limit).await?;
            render(&result, Listing::Latest, json_output)?
        }
        Command::Search {
            keyword,
            limit,
            json_output,
        } => {
            let result = client.search(&keyword, limit).await?;
            render(&result, Listing::Search { keyword: &keyword }, json_output)?
        }
        Command::Company {
            code,
            limit,
            json_output,
        } => {
            let result = client.get_by_code(&code, limit).await?;
            render(&result, Listing::Company { code: &code }, json_output)?
        }
        Command::ByDate {
            target_date,
            json_output,
        } => {
            let date = parse_iso_date(&target_date)?;
            let result = client.get_by_date(date).await?;
            render(&result, Listing::ByDate { date: &target_date }, json_output)?
        }
        Command::Range {
            start_date,
            end_date,
            json_output,
        } => {
            let start = parse_iso_date(&start_date)?;
            let end = parse_iso_date(&end_date)?;
            let result = client.get_by_date_range(start, end).await?;
            render(&result, Listing::Range, json_output)?
        }
        Command::Test => {
            println!("Testing TDNET (Yanoshin API) connection...");
            if client.test_connection().await {
                println!("Connection successful!");
                return Ok(ExitCode::SUCCESS);
            }
            println!("Connection failed");
            return Ok(ExitCode::FAILURE);
        }
        Command::Version | Command::Serve => return Ok(ExitCode::SUCCESS),
    };

    print!("{}", rendered);
    Ok(ExitCode::SUCCESS)
}

fn render(
    result: &tdnet_client::DisclosureList,
    listing: Listing<'_>,
    json_output: bool,
) -> Result<String, CliError> {
    if json_output {
        Ok(format!("{}\n", render_json(result)?))
    } else {
        Ok(render_text(result, listing))
    }
}
