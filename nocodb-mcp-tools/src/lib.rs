//! # NocoDB MCP Tools
//!
//! MCP (Model Context Protocol) tools and server implementation for reading
//! records out of a NocoDB table.
//!
//! This crate provides the MCP server functionality and the single tool it
//! serves:
//!
//! - **MCP Server**: stdio Model Context Protocol server implementation
//! - **Tool Registry**: extensible tool registration system
//! - **Records Tool**: paginated (and optionally shuffled) record fetching
//!   from a fixed NocoDB table
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nocodb_mcp_tools::{McpServer, NocoDbConfig};
//!
//! let config = NocoDbConfig::from_env();
//! let server = McpServer::new(config);
//! // Server is ready to handle MCP requests
//! ```

#![warn(missing_docs)]

/// Model Context Protocol (MCP) server and tools
pub mod mcp;

// Re-export key types for convenience
pub use mcp::tools::records::nocodb_client::{
    NocoDbClient, NocoDbConfig, NocoDbError, RecordsPage, RecordsQuery,
};
pub use mcp::McpServer;
pub use mcp::{ToolContext, ToolRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
