//! MCP Server implementation
//!
//! This module defines the main MCP server that exposes OmniFocus
//! operations as tools. Handler implementations are in the handlers/ module;
//! every handler talks to OmniFocus through the server's [`ScriptRunner`].

use std::sync::Arc;

use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde_json::Value;

use crate::config::{Config, ReportConfig};
use crate::handlers;
use crate::omnifocus::{Osascript, ScriptRunner};
use crate::params::*;

const INSTRUCTIONS: &str = "OmniFocus MCP Server - provides tools for reading the OmniFocus \
     database as a compact report, looking up tasks, and adding, editing and removing tasks \
     and projects. Requires macOS with OmniFocus installed and automation permission for \
     osascript.";

/// The main OmniFocus MCP Server
#[derive(Clone)]
pub struct OmniFocusMcpServer {
    runner: Arc<dyn ScriptRunner>,
    report: ReportConfig,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Read Tools
// ============================================================================

#[tool_router(router = read_tool_router)]
impl OmniFocusMcpServer {
    #[tool(description = "Gets the current state of your OmniFocus database")]
    async fn dump_database(
        &self,
        Parameters(params): Parameters<DumpDatabaseParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::dump_database(self.runner.as_ref(), &self.report, params).await
    }

    #[tool(description = "Get detailed information about a specific task by ID or name")]
    async fn get_task_details(
        &self,
        Parameters(params): Parameters<GetTaskDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_task_details(self.runner.as_ref(), params).await
    }
}

// ============================================================================
// Write Tools
// ============================================================================

#[tool_router(router = write_tool_router)]
impl OmniFocusMcpServer {
    #[tool(description = "Add a new task to OmniFocus")]
    async fn add_omnifocus_task(
        &self,
        Parameters(params): Parameters<AddTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_omnifocus_task(self.runner.as_ref(), params).await
    }

    #[tool(description = "Add a new project to OmniFocus")]
    async fn add_project(
        &self,
        Parameters(params): Parameters<AddProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_project(self.runner.as_ref(), params).await
    }

    #[tool(description = "Remove a task or project from OmniFocus")]
    async fn remove_item(
        &self,
        Parameters(params): Parameters<RemoveItemParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::remove_item(self.runner.as_ref(), params).await
    }

    #[tool(description = "Edit a task or project in OmniFocus")]
    async fn edit_item(
        &self,
        Parameters(params): Parameters<EditItemParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::edit_item(self.runner.as_ref(), params).await
    }

    #[tool(description = "Add multiple tasks or projects to OmniFocus in a single operation")]
    async fn batch_add_items(
        &self,
        Parameters(params): Parameters<BatchAddItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::batch_add_items(self.runner.as_ref(), params).await
    }

    #[tool(
        description = "Remove multiple tasks or projects from OmniFocus in a single operation"
    )]
    async fn batch_remove_items(
        &self,
        Parameters(params): Parameters<BatchRemoveItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::batch_remove_items(self.runner.as_ref(), params).await
    }
}

// ============================================================================
// Router Composition & Server Initialization
// ============================================================================

impl OmniFocusMcpServer {
    /// Server that runs scripts through the configured `osascript`
    pub fn new(config: Config) -> Self {
        let runner = Osascript::new(config.bridge.program, config.bridge.timeout_secs);
        Self::with_runner(Arc::new(runner), config.report)
    }

    /// Server backed by any [`ScriptRunner`]
    pub fn with_runner(runner: Arc<dyn ScriptRunner>, report: ReportConfig) -> Self {
        Self {
            runner,
            report,
            tool_router: Self::read_tool_router() + Self::write_tool_router(),
        }
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for OmniFocusMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

impl Default for OmniFocusMcpServer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait::async_trait]
impl EmbeddableMcp for OmniFocusMcpServer {
    fn server_name(&self) -> &str {
        "omnifocus"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "dump_database" => {
                let params: DumpDatabaseParams = serde_json::from_value(params)?;
                self.dump_database(Parameters(params)).await.map_err(Into::into)
            }

            "get_task_details" => {
                let params: GetTaskDetailsParams = serde_json::from_value(params)?;
                self.get_task_details(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "add_omnifocus_task" => {
                let params: AddTaskParams = serde_json::from_value(params)?;
                self.add_omnifocus_task(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "add_project" => {
                let params: AddProjectParams = serde_json::from_value(params)?;
                self.add_project(Parameters(params)).await.map_err(Into::into)
            }

            "remove_item" => {
                let params: RemoveItemParams = serde_json::from_value(params)?;
                self.remove_item(Parameters(params)).await.map_err(Into::into)
            }

            "edit_item" => {
                let params: EditItemParams = serde_json::from_value(params)?;
                self.edit_item(Parameters(params)).await.map_err(Into::into)
            }

            "batch_add_items" => {
                let params: BatchAddItemsParams = serde_json::from_value(params)?;
                self.batch_add_items(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "batch_remove_items" => {
                let params: BatchRemoveItemsParams = serde_json::from_value(params)?;
                self.batch_remove_items(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
