//! Command line entry point for the NocoDB MCP server
//!
//! The binary has a single job: resolve configuration from the environment,
//! build the MCP server, and run it over stdio. Stdout belongs to the MCP
//! protocol, so all logging goes to stderr.

use clap::{Parser, Subcommand};
use nocodb_mcp_tools::mcp::{serve_stdio, McpServer};
use nocodb_mcp_tools::NocoDbConfig;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

#[derive(Parser)]
#[command(name = "nocodb-mcp")]
#[command(version)]
#[command(about = "MCP server exposing read access to a NocoDB table")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Suppress all logging except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the MCP server on stdio (the default when no command is given)
    Serve,
}

fn configure_logging(debug: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // RUST_LOG wins when set; otherwise keep rmcp wire chatter down.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rmcp=warn,{log_level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run_serve() -> i32 {
    let config = NocoDbConfig::from_env();
    if config.api_token.is_none() {
        tracing::warn!(
            "NOCODB_TOKEN is not set; records_fetch will require a per-call token"
        );
    }

    let server = McpServer::new(config);
    match serve_stdio(server).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("MCP server failed: {}", e);
            EXIT_ERROR
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.debug, cli.quiet);

    let exit_code = match cli.command {
        Some(Command::Serve) | None => run_serve().await,
    };

    std::process::exit(exit_code);
}
