//! Serve and tools command implementations

use std::process::ExitCode;

use tokio::runtime::Runtime;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::DevtoolsConfig;
use crate::mcp::DevtoolsMcpServer;

/// Execute the serve command: run the MCP server until stdin closes.
pub fn run_serve(config: DevtoolsConfig) -> ExitCode {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create async runtime: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match rt.block_on(crate::mcp::run_server(config)) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: MCP server failed: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the tools command: print each tool name with its description.
pub fn run_tools(config: DevtoolsConfig) -> ExitCode {
    let server = DevtoolsMcpServer::new(config);
    for tool in server.tools() {
        let description = tool.description.as_deref().unwrap_or("");
        println!("{:<26} {}", tool.name, description);
    }
    ExitCode::from(EXIT_SUCCESS)
}
