//! Record reading tools for MCP operations
//!
//! This module provides tools for reading rows out of the configured NocoDB
//! table through the MCP protocol:
//! - `records_fetch`: fetch a page of records with optional shuffling

pub mod fetch;
pub mod nocodb_client;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all records-related tools with the registry
pub fn register_records_tools(registry: &mut ToolRegistry) {
    registry.register(fetch::FetchRecordsTool::new());
}
