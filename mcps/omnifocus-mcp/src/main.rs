//! OmniFocus MCP Server
//!
//! MCP server for OmniFocus: a compact report of the whole database, task
//! lookup, and task/project writes.
//!
//! # Usage
//!
//! Run directly: `omnifocus-mcp` (same as `omnifocus-mcp serve`)
//!
//! Print the report without a client: `omnifocus-mcp report --show-completed`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "omnifocus": { "command": "./omnifocus-mcp" } } }
//! ```
//!
//! # Configuration
//! `--config PATH`, `OMNIFOCUS_CONFIG_PATH` or `~/.binks/omnifocus.toml`

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};

use omnifocus_mcp::omnifocus::{fetch_database, Osascript};
use omnifocus_mcp::report::{format_compact_report, ReportOptions};
use omnifocus_mcp::{Config, OmniFocusMcpServer};

#[derive(Parser)]
#[command(name = "omnifocus-mcp")]
#[command(about = "MCP server for OmniFocus", version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP server on stdio (default)
    Serve,
    /// Print the database report to stdout and exit
    Report {
        /// Include completed and dropped items
        #[arg(long)]
        show_completed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    mcp_common::init_tracing("omnifocus_mcp", "info")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    tracing::info!(
        program = %config.bridge.program,
        timeout_secs = config.bridge.timeout_secs,
        "bridge configured"
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Report { show_completed } => report(config, show_completed).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    tracing::info!("Starting OmniFocus MCP Server");

    let server = OmniFocusMcpServer::new(config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

async fn report(config: Config, show_completed: bool) -> Result<()> {
    let runner = Osascript::new(config.bridge.program, config.bridge.timeout_secs);
    let db = fetch_database(&runner).await?;

    let options = ReportOptions {
        hide_completed: !show_completed && config.report.hide_completed,
        ..Default::default()
    };
    print!("{}", format_compact_report(&db, &options));
    Ok(())
}
