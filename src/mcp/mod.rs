//! MCP (Model Context Protocol) server for mcp-devtools
//!
//! Exposes the developer tools as MCP tools over stdio so AI assistants
//! can convert colors, run commands, and inspect the host directly.
//!
//! Start the server with `mcp-devtools` or `mcp-devtools serve`.

mod server;
pub mod tools;

pub use server::{run_server, DevtoolsMcpServer};
