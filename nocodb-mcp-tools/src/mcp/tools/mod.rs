//! MCP tool implementations organized by domain
//!
//! Each domain gets its own submodule with a `register_*_tools` function that
//! adds its tools to a [`ToolRegistry`](super::tool_registry::ToolRegistry).

pub mod records;
