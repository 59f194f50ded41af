//! Tool registry for MCP operations
//!
//! This module provides a registry pattern for managing MCP tools:
//!
//! 1. **McpTool Trait**: Defines the interface that all tools must implement
//! 2. **ToolRegistry**: Central registry that stores and manages tool instances
//! 3. **ToolContext**: Shared context providing configuration and the NocoDB client
//! 4. **BaseToolImpl**: Common utility methods for tool implementations

use super::responses;
use rmcp::model::{CallToolResult, Tool};
use rmcp::ErrorData as McpError;
use std::collections::HashMap;
use std::sync::Arc;

use super::tools::records::nocodb_client::{NocoDbClient, NocoDbConfig};

/// Context shared by all tools during execution
///
/// The context is the dependency injection mechanism for the registry
/// pattern: it carries the configuration resolved once at startup (including
/// the environment-sourced fallback token) and the shared HTTP client. No
/// state is retained across invocations beyond these.
#[derive(Clone)]
pub struct ToolContext {
    /// Startup-resolved configuration; per-call parameters take precedence
    /// over values found here
    pub config: Arc<NocoDbConfig>,
    /// Shared NocoDB API client built from the configuration
    pub client: Arc<NocoDbClient>,
}

impl ToolContext {
    /// Create a new tool context from a resolved configuration
    pub fn new(config: NocoDbConfig) -> Self {
        let client = Arc::new(NocoDbClient::new(config.clone()));
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

/// Trait defining the interface for all MCP tools
///
/// Tools are stateless and derive all context from the [`ToolContext`]. They
/// must be `Send + Sync` to work in async environments and provide their own
/// schema and documentation.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's unique identifier name
    ///
    /// Names follow the `{domain}_{action}` pattern (e.g. `records_fetch`)
    /// and must be unique within the registry.
    fn name(&self) -> &'static str;

    /// Get the tool's human-readable description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for argument validation
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    ///
    /// Tool-level failures (remote errors, transport faults) are converted to
    /// textual responses; only argument-shape problems surface as [`McpError`].
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
///
/// HashMap-backed store keyed by tool name. The registry itself is not
/// thread-safe and is wrapped in a lock by the server; individual tools are
/// `Send + Sync` and can be called concurrently.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool::new(tool.name(), tool.description(), Arc::new(schema_map))
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// Create a success response with the given text content
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        responses::create_success_response(content.into())
    }

    /// Create an error response with the given error message and optional details
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let error_text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };
        responses::create_error_response(error_text)
    }
}

/// Register all records-related tools with the registry
pub fn register_records_tools(registry: &mut ToolRegistry) {
    use super::tools::records;
    records::register_records_tools(registry);
}
