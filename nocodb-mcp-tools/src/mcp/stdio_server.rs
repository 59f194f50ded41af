//! Stdio MCP server transport using rmcp
//!
//! This module wires an [`McpServer`] to the process stdin/stdout using the
//! rmcp stdio transport instead of reimplementing the MCP protocol. Stdout
//! carries protocol frames only; all diagnostics go to stderr via tracing.

use rmcp::serve_server;
use rmcp::transport::io::stdio;

use super::server::McpServer;

/// Run the MCP server over stdio until the client disconnects.
///
/// Blocks for the lifetime of the client connection. For stdio transport
/// there is no separate shutdown path; the server quits when stdin closes.
pub async fn serve_stdio(server: McpServer) -> anyhow::Result<()> {
    tracing::info!("Starting MCP server in stdio mode");

    let running_service = serve_server(server, stdio()).await?;
    tracing::info!("MCP stdio server started successfully");

    let quit_reason = running_service.waiting().await?;
    tracing::info!("MCP stdio server completed: {:?}", quit_reason);

    Ok(())
}
