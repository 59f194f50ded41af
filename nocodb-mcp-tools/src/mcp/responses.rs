//! Response creation utilities for MCP operations
//!
//! Every tool response is a plain text payload wrapped in a
//! [`CallToolResult`]; the `is_error` flag is the only structural signal of
//! failure.

use rmcp::model::{CallToolResult, Content};

/// Create a success response with text content
pub fn create_success_response(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message)])
}

/// Create an error response with text content
pub fn create_error_response(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message)])
}
