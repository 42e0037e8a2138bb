//! mcp-devtools - Developer tools served over the Model Context Protocol
//!
//! This library provides:
//! - A CSS color engine converting between hex, RGB, HSL, HSV, CMYK, Lab and XYZ
//! - Host inspection tools (IP addresses, time, environment, old downloads)
//! - Shell command execution and npm registry lookups
//! - An rmcp-based stdio server wiring them together

pub mod cli;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod mcp;
pub mod telemetry;
