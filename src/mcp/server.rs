//! Core MCP server implementation.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use serde::Serialize;

use super::tools::color::{self, ColorInput};
use super::tools::current_time;
use super::tools::downloads::{self, OldDownloadsInput};
use super::tools::environment::{self, EnvironmentInput};
use super::tools::exec::{self, ExecInput};
use super::tools::network;
use super::tools::npm::{self, NpmPackageInput};
use crate::config::DevtoolsConfig;
use crate::error::ToolError;
use crate::telemetry::ErrorCollector;

/// The mcp-devtools MCP Server
///
/// Exposes the developer tools as MCP tools. Holds only read-only
/// configuration; every call is independent.
#[derive(Debug, Clone)]
pub struct DevtoolsMcpServer {
    config: Arc<DevtoolsConfig>,
    collector: ErrorCollector,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DevtoolsMcpServer {
    pub fn new(config: DevtoolsConfig) -> Self {
        let collector =
            ErrorCollector::new(&config.telemetry.error_log, config.telemetry.collect_errors);
        Self { config: Arc::new(config), collector, tool_router: Self::tool_router() }
    }

    #[tool(
        name = "color_convert",
        description = "Convert CSS color values to various color formats (Hex, RGB, HSL, HSV, CMYK, LAB, XYZ, Linear RGB). Supports hex (#ff5733), rgb(255, 87, 51), hsl(9, 100%, 60%), and named colors (red, blue, etc.)"
    )]
    async fn color_convert(
        &self,
        Parameters(input): Parameters<ColorInput>,
    ) -> Result<CallToolResult, McpError> {
        let original = input.color.clone();
        self.respond(color::NAME, Some(&original), color::run_color_convert(input))
    }

    #[tool(
        name = "get_ip_address",
        description = "Get the current computer's IP addresses, including all network interfaces and the primary IP address"
    )]
    async fn get_ip_address(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = network::run_get_ip_address(&context.ct).await;
        self.respond(network::NAME, None, result)
    }

    #[tool(name = "current_time", description = "Get the current server time in RFC1123 format")]
    async fn current_time(&self) -> Result<CallToolResult, McpError> {
        self.respond(current_time::NAME, None, Ok::<_, ToolError>(current_time::run_current_time()))
    }

    #[tool(
        name = "execute_command",
        description = "Execute a shell command and return its stdout, stderr and exit code. Optionally runs in the given working directory."
    )]
    async fn execute_command(
        &self,
        Parameters(input): Parameters<ExecInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let command = input.command.clone();
        let result = exec::run_execute_command(input, &self.config.exec, &context.ct).await;
        self.respond(exec::NAME, Some(&command), result)
    }

    #[tool(
        name = "get_environment",
        description = "List the server's environment variables, optionally filtered by a case-insensitive substring of the name"
    )]
    async fn get_environment(
        &self,
        Parameters(input): Parameters<EnvironmentInput>,
    ) -> Result<CallToolResult, McpError> {
        let output = environment::run_get_environment(input);
        self.respond(environment::ENVIRONMENT_NAME, None, Ok::<_, ToolError>(output))
    }

    #[tool(name = "get_working_directory", description = "Get the server's current working directory")]
    async fn get_working_directory(&self) -> Result<CallToolResult, McpError> {
        let result = environment::run_get_working_directory();
        self.respond(environment::WORKING_DIRECTORY_NAME, None, result)
    }

    #[tool(
        name = "list_old_downloads",
        description = "List files in the Downloads directory that have not been modified for a long time (default: 90 days)"
    )]
    async fn list_old_downloads(
        &self,
        Parameters(input): Parameters<OldDownloadsInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result =
            downloads::run_list_old_downloads(input, &self.config.downloads, &context.ct).await;
        self.respond(downloads::NAME, None, result)
    }

    #[tool(
        name = "npm_dependencies_analyze",
        description = "Look up an npm package in the registry and report the resolved version, latest version, description and direct dependencies"
    )]
    async fn npm_dependencies_analyze(
        &self,
        Parameters(input): Parameters<NpmPackageInput>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let package = match &input.version {
            Some(v) => format!("{}@{}", input.package_name, v),
            None => input.package_name.clone(),
        };
        let result = npm::run_npm_dependencies_analyze(input, &self.config.npm, &context.ct).await;
        self.respond(npm::NAME, Some(&package), result)
    }
}

impl DevtoolsMcpServer {
    /// Every tool this server exposes, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Turn a tool result into an MCP response.
    ///
    /// Output is returned as JSON text. Failures become `isError` results
    /// carrying the message and are recorded by the error collector.
    fn respond<T: Serialize>(
        &self,
        tool: &str,
        input: Option<&str>,
        result: Result<T, ToolError>,
    ) -> Result<CallToolResult, McpError> {
        match result {
            Ok(output) => Ok(CallToolResult::success(vec![Content::json(output)?])),
            Err(err) => {
                self.collector.record(tool, input, &err);
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for DevtoolsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-devtools".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "A collection of useful developer tools: color conversion, network \
                 information, current time, shell commands, environment inspection, \
                 old download cleanup and npm dependency lookup."
                    .into(),
            ),
        }
    }
}

/// Run the MCP server on stdin/stdout
pub async fn run_server(config: DevtoolsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let server = DevtoolsMcpServer::new(config);
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
