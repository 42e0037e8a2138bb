//! MCP execute_command tool: run a shell command and capture its output.

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use super::cancellable;
use crate::config::ExecConfig;
use crate::error::ToolError;

pub const NAME: &str = "execute_command";

/// Input parameters for the execute_command tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExecInput {
    /// Command line, run through the system shell.
    #[schemars(description = "Command line, run through the system shell")]
    pub command: String,

    /// Working directory for the command (defaults to the server's working directory).
    #[schemars(
        description = "Working directory for the command (defaults to the server's working directory)"
    )]
    pub workdir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit status, absent when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Program and flag used to hand a command line to the shell.
///
/// An explicit `flag` wins; otherwise it follows from the shell's name.
pub fn shell_invocation(shell: Option<&str>, flag: Option<&str>) -> (String, String) {
    let program = match shell {
        Some(shell) => shell.trim().to_string(),
        None if cfg!(windows) => "cmd".to_string(),
        None => "sh".to_string(),
    };
    let flag = match flag {
        Some(flag) => flag.trim().to_string(),
        None => default_shell_flag(&program).to_string(),
    };
    (program, flag)
}

fn default_shell_flag(program: &str) -> &'static str {
    let name = program.rsplit(['/', '\\']).next().unwrap_or(program).to_ascii_lowercase();
    match name.trim_end_matches(".exe") {
        "cmd" => "/C",
        "powershell" | "pwsh" => "-Command",
        _ => "-c",
    }
}

/// Execute the execute_command tool logic.
///
/// A command that runs and exits non-zero is a successful invocation with
/// `success: false`; only failing to run it at all is an error.
pub async fn run_execute_command(
    input: ExecInput,
    config: &ExecConfig,
    ct: &CancellationToken,
) -> Result<ExecOutput, ToolError> {
    if input.command.trim().is_empty() {
        return Err(ToolError::validation(NAME, "command must not be empty"));
    }

    let (program, flag) = shell_invocation(config.shell.as_deref(), config.shell_flag.as_deref());
    let mut cmd = Command::new(&program);
    cmd.arg(&flag)
        .arg(&input.command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = input.workdir.as_deref().filter(|d| !d.is_empty()) {
        if !Path::new(dir).is_dir() {
            return Err(ToolError::external(
                NAME,
                format!("working directory '{}' is not accessible", dir),
                io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            ));
        }
        cmd.current_dir(dir);
    }

    let child = cmd
        .spawn()
        .map_err(|e| ToolError::external(NAME, format!("failed to start '{}'", program), e))?;

    let timeout_secs = config.timeout_secs;
    let wait = async move {
        let output = if timeout_secs == 0 {
            child.wait_with_output().await
        } else {
            match tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output())
                .await
            {
                Ok(output) => output,
                Err(elapsed) => {
                    return Err(ToolError::external(
                        NAME,
                        format!("command timed out after {} seconds", timeout_secs),
                        elapsed,
                    ))
                }
            }
        };
        output.map_err(|e| ToolError::external(NAME, "failed to collect command output", e))
    };

    // Dropping the child on cancellation or timeout kills it.
    let output = cancellable(NAME, ct, wait).await?;

    Ok(ExecOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
        success: output.status.success(),
    })
}
