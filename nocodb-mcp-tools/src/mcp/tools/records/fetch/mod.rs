//! Fetch records tool for MCP operations
//!
//! This module provides the `records_fetch` tool: one page of rows from the
//! configured NocoDB table, with pagination and optional shuffling.
//!
//! Outcome mapping is deliberately flat. Whatever happens past argument
//! parsing (missing credential, remote rejection, network fault) comes back
//! as a textual tool response rather than a protocol error, so MCP clients
//! always get something they can show to a model.

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::tools::records::nocodb_client::{NocoDbError, RecordsQuery};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

/// Default page size when `limit` is omitted.
const DEFAULT_LIMIT: u32 = 25;

/// Smallest accepted page size.
const MIN_LIMIT: u32 = 1;

/// Largest accepted page size.
const MAX_LIMIT: u32 = 1000;

/// Default offset when omitted.
const DEFAULT_OFFSET: u32 = 0;

/// Default shuffle flag when omitted.
const DEFAULT_SHUFFLE: u8 = 0;

/// Response text returned when no credential is available from either the
/// call or the server configuration. The request is never sent in that case.
pub const MISSING_TOKEN_TEXT: &str =
    "Error: NOCODB_TOKEN is not set and no token was provided";

/// Request structure for fetching records
#[derive(Debug, Deserialize)]
pub struct FetchRecordsRequest {
    /// Maximum number of records to return (1-1000, default 25)
    pub limit: Option<u32>,
    /// Number of records to skip (default 0)
    pub offset: Option<u32>,
    /// 1 to return records in random order (default 0)
    pub shuffle: Option<u8>,
    /// API token overriding the server-configured one for this call
    pub token: Option<String>,
}

/// Tool for fetching a page of records from the NocoDB table
#[derive(Default)]
pub struct FetchRecordsTool;

impl FetchRecordsTool {
    /// Creates a new instance of the FetchRecordsTool
    pub fn new() -> Self {
        Self
    }

    /// Validates the request parameters and fills in defaults.
    ///
    /// Out-of-range values are argument-shape problems and surface as
    /// protocol errors, not tool responses.
    fn validate_request(request: &FetchRecordsRequest) -> Result<RecordsQuery, McpError> {
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(McpError::invalid_params(
                format!("limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {limit}"),
                None,
            ));
        }

        let shuffle = request.shuffle.unwrap_or(DEFAULT_SHUFFLE);
        if shuffle > 1 {
            return Err(McpError::invalid_params(
                format!("shuffle must be 0 or 1, got {shuffle}"),
                None,
            ));
        }

        Ok(RecordsQuery {
            limit,
            offset: request.offset.unwrap_or(DEFAULT_OFFSET),
            shuffle,
        })
    }
}

/// Truncates a log line to at most `max_len` characters, appending an
/// ellipsis marker when anything was cut. Splits on character boundaries.
fn truncate_for_log(line: &str, max_len: usize) -> String {
    if line.chars().count() <= max_len {
        return line.to_string();
    }
    let truncated: String = line.chars().take(max_len).collect();
    format!("{truncated}...")
}

#[async_trait::async_trait]
impl McpTool for FetchRecordsTool {
    fn name(&self) -> &'static str {
        "records_fetch"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of records to return",
                    "minimum": MIN_LIMIT,
                    "maximum": MAX_LIMIT,
                    "default": DEFAULT_LIMIT
                },
                "offset": {
                    "type": "integer",
                    "description": "Number of records to skip before the page starts",
                    "minimum": 0,
                    "default": DEFAULT_OFFSET
                },
                "shuffle": {
                    "type": "integer",
                    "description": "Set to 1 to return records in random order",
                    "minimum": 0,
                    "maximum": 1,
                    "default": DEFAULT_SHUFFLE
                },
                "token": {
                    "type": "string",
                    "description": "NocoDB API token overriding the server-configured token"
                }
            },
            "required": [],
            "additionalProperties": false
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult, McpError> {
        let request: FetchRecordsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let query = Self::validate_request(&request)?;

        // Per-call token beats the startup-resolved one.
        let token = request
            .token
            .as_deref()
            .or(context.config.api_token.as_deref());

        let Some(token) = token else {
            tracing::warn!("records_fetch called without a token and none configured");
            return Ok(BaseToolImpl::create_error_response(MISSING_TOKEN_TEXT, None));
        };

        match context.client.fetch_records(&query, token).await {
            Ok(page) => {
                tracing::info!(
                    "Fetched {} records from table {} (limit={}, offset={}, shuffle={})",
                    page.count,
                    context.config.table_id,
                    query.limit,
                    query.offset,
                    query.shuffle
                );
                for record in &page.records {
                    tracing::debug!(
                        "record: {}",
                        truncate_for_log(&record.to_string(), context.config.log_record_max_len)
                    );
                }

                let envelope = serde_json::to_string_pretty(&page).map_err(|e| {
                    McpError::internal_error(
                        format!("Failed to serialize records: {e}"),
                        None,
                    )
                })?;
                Ok(BaseToolImpl::create_success_response(envelope))
            }
            Err(e @ NocoDbError::Failed { .. }) => {
                // Body already logged by the client; only the status line
                // goes back to the caller.
                Ok(BaseToolImpl::create_error_response(e.to_string(), None))
            }
            Err(e) => {
                tracing::error!("records_fetch failed: {}", e);
                Ok(BaseToolImpl::create_error_response(
                    format!("Error: {e}"),
                    None,
                ))
            }
        }
    }
}
