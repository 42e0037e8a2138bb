//! mcp-devtools - MCP server exposing a collection of developer tools

use std::process::ExitCode;

use mcp_devtools::cli;

fn main() -> ExitCode {
    cli::run()
}
