//! MCP server implementation for serving the NocoDB records tools

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::tool_registry::{register_records_tools, ToolContext, ToolRegistry};
use super::tools::records::nocodb_client::NocoDbConfig;

/// Server instructions displayed to MCP clients
const SERVER_INSTRUCTIONS: &str =
    "Read-only access to a NocoDB table. Use records_fetch to page through its records.";

/// Create ServerCapabilities for MCP protocol
fn create_server_capabilities() -> ServerCapabilities {
    let mut capabilities = ServerCapabilities::default();
    capabilities.tools = Some(ToolsCapability {
        list_changed: Some(false),
    });
    capabilities
}

/// Create Implementation information for the MCP server
fn create_server_implementation() -> Implementation {
    Implementation::new("nocodb-mcp", crate::VERSION).with_title("NocoDB MCP Server")
}

/// MCP server exposing the NocoDB records tools.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<RwLock<ToolRegistry>>,
    /// Shared context handed to every tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Creates a new MCP server from a resolved configuration.
    ///
    /// The configuration (including any environment-sourced token) is
    /// captured here; tools never consult the environment themselves.
    pub fn new(config: NocoDbConfig) -> Self {
        let mut tool_registry = ToolRegistry::new();
        register_records_tools(&mut tool_registry);
        tracing::debug!("Registered {} MCP tools", tool_registry.len());

        Self {
            tool_registry: Arc::new(RwLock::new(tool_registry)),
            tool_context: Arc::new(ToolContext::new(config)),
        }
    }

    /// List all available tools from the tool registry.
    pub async fn list_tools(&self) -> Vec<rmcp::model::Tool> {
        self.tool_registry.read().await.list_tools()
    }

    /// Check whether a tool with the given name is registered.
    pub async fn has_tool(&self, name: &str) -> bool {
        self.tool_registry.read().await.get_tool(name).is_some()
    }

    /// Execute a registered tool by name.
    ///
    /// This is the same path `call_tool` takes, exposed for in-process use.
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let registry = self.tool_registry.read().await;
        let tool = registry.get_tool(name).ok_or_else(|| {
            tracing::error!("🔧 Unknown tool requested: {}", name);
            McpError::invalid_request(format!("Unknown tool: {}", name), None)
        })?;

        tracing::info!("🔧 Executing tool: {}", name);
        let result = tool.execute(arguments, &self.tool_context).await;
        tracing::debug!("🔧 Tool execution result for {}: {:?}", name, result);
        result
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "🚀 MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult::new(create_server_capabilities())
            .with_instructions(SERVER_INSTRUCTIONS)
            .with_server_info(create_server_implementation()))
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.read().await.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::debug!(
            "🔧 call_tool() invoked for tool: {}, arguments: {:?}",
            request.name,
            request.arguments
        );

        let arguments = request.arguments.unwrap_or_default();
        self.execute_tool(&request.name, arguments).await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(create_server_capabilities())
            .with_instructions(SERVER_INSTRUCTIONS)
            .with_server_info(create_server_implementation())
    }
}
