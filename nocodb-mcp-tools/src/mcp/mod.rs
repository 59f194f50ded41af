//! Model Context Protocol (MCP) server support
//!
//! This module implements the server infrastructure for handling MCP
//! requests:
//!
//! - **Server Implementation**: [`McpServer`] handles MCP protocol messages
//! - **Tool Registry**: [`ToolRegistry`] manages available tools and their execution
//! - **Tool Context**: [`ToolContext`] provides shared configuration and the
//!   NocoDB API client to tools
//!
//! ## Starting a server
//!
//! ```rust,no_run
//! use nocodb_mcp_tools::mcp::{serve_stdio, McpServer};
//! use nocodb_mcp_tools::NocoDbConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let server = McpServer::new(NocoDbConfig::from_env());
//! serve_stdio(server).await?;
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod responses;
pub mod server;
pub mod stdio_server;
pub mod tool_registry;
pub mod tools;

// Re-export commonly used items from submodules
pub use server::McpServer;
pub use stdio_server::serve_stdio;
pub use tool_registry::{register_records_tools, ToolContext, ToolRegistry};
