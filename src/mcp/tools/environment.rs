//! MCP environment tools: get_environment and get_working_directory.

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

pub const ENVIRONMENT_NAME: &str = "get_environment";
pub const WORKING_DIRECTORY_NAME: &str = "get_working_directory";

/// Input parameters for the get_environment tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct EnvironmentInput {
    /// Only return variables whose name contains this text (case-insensitive).
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnvironmentOutput {
    /// Environment variables, sorted by name
    pub variables: BTreeMap<String, String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct WorkingDirectoryOutput {
    /// Absolute path of the server's working directory
    pub path: String,
}

/// Execute the get_environment tool logic.
pub fn run_get_environment(input: EnvironmentInput) -> EnvironmentOutput {
    snapshot(env::vars_os(), input.filter.as_deref())
}

fn snapshot(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
    filter: Option<&str>,
) -> EnvironmentOutput {
    let needle = filter.map(str::trim).filter(|f| !f.is_empty()).map(str::to_lowercase);

    let variables: BTreeMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()))
        .filter(|(k, _)| needle.as_ref().map_or(true, |n| k.to_lowercase().contains(n)))
        .collect();

    EnvironmentOutput { count: variables.len(), variables }
}

/// Execute the get_working_directory tool logic.
pub fn run_get_working_directory() -> Result<WorkingDirectoryOutput, ToolError> {
    let dir = env::current_dir().map_err(|e| {
        ToolError::external(WORKING_DIRECTORY_NAME, "failed to get working directory", e)
    })?;
    Ok(WorkingDirectoryOutput { path: dir.display().to_string() })
}
