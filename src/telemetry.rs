//! Local error telemetry for tool invocations
//!
//! Failed tool calls are appended to a JSONL file for later analysis.
//! Only the tool name, the offending input and the error are recorded.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::clock::now_iso8601;
use crate::error::ToolError;

/// One failed tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
    /// The tool that failed (e.g., "color_convert", "execute_command")
    pub tool: String,
    /// The input that caused the failure (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Type of error (e.g., "unparseable_color", "not_found")
    pub error_type: String,
    /// Error message
    pub context: String,
}

impl ErrorEntry {
    /// Entry stamped with the current time
    pub fn new(
        tool: impl Into<String>,
        error_type: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: now_iso8601(),
            tool: tool.into(),
            input: None,
            error_type: error_type.into(),
            context: context.into(),
        }
    }

    /// Build an entry from a tool failure
    pub fn from_tool_error(tool: &str, err: &ToolError) -> Self {
        Self::new(tool, err.kind(), err.to_string())
    }

    /// Set the input that was being processed
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

/// Appends failed tool calls to a JSONL file when enabled
#[derive(Debug, Clone)]
pub struct ErrorCollector {
    path: PathBuf,
    enabled: bool,
}

impl ErrorCollector {
    pub fn new(path: impl AsRef<Path>, enabled: bool) -> Self {
        Self { path: path.as_ref().to_path_buf(), enabled }
    }

    /// A collector that never writes
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one JSON line for `entry`, creating parent directories.
    /// A disabled collector does nothing.
    pub fn log(&self, entry: &ErrorEntry) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut line = serde_json::to_string(entry).map_err(io::Error::other)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // One append write per entry.
        OpenOptions::new().create(true).append(true).open(&self.path)?.write_all(line.as_bytes())
    }

    /// Log a tool failure, reporting write failures on stderr
    pub fn record(&self, tool: &str, input: Option<&str>, err: &ToolError) {
        let mut entry = ErrorEntry::from_tool_error(tool, err);
        if let Some(input) = input {
            entry = entry.with_input(input);
        }
        if let Err(e) = self.log(&entry) {
            eprintln!("Warning: failed to write error log {}: {}", self.path.display(), e);
        }
    }
}
