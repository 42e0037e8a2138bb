//! Configuration module for mcp-devtools
//!
//! Provides types, discovery and parsing for the optional `devtools.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
