//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod color;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, DevtoolsConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// mcp-devtools - A collection of developer tools served over MCP
#[derive(Parser)]
#[command(name = "mcp-devtools")]
#[command(about = "mcp-devtools - Developer tools (color conversion, shell, environment, npm) served over MCP stdio")]
#[command(version)]
pub struct Cli {
    /// Path to devtools.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append tool failures to the error log as JSON lines
    #[arg(long, global = true)]
    pub collect_errors: bool,

    /// Directory scanned by list_old_downloads
    #[arg(long, global = true)]
    pub downloads_dir: Option<PathBuf>,

    /// Timeout for execute_command in seconds (0 disables it)
    #[arg(long, global = true)]
    pub exec_timeout: Option<u64>,

    /// npm registry base URL
    #[arg(long, global = true)]
    pub registry: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,

    /// Convert a single CSS color value and print every notation
    Color {
        /// Color value: #ff5733, rgb(255, 87, 51), hsl(9, 100%, 60%) or a name
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the tools the server exposes
    Tools,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            downloads_dir: self.downloads_dir.clone(),
            exec_timeout_secs: self.exec_timeout,
            registry: self.registry.clone(),
            collect_errors: self.collect_errors.then_some(true),
        }
    }
}

/// Parse arguments and run the requested command.
pub fn run() -> ExitCode {
    let mut cli = Cli::parse();

    // Only the server commands read devtools.toml.
    match cli.command.take().unwrap_or(Commands::Serve) {
        Commands::Color { value, json } => color::run_color(&value, json),
        Commands::Serve => match load_checked_config(&cli) {
            Ok(config) => server::run_serve(config),
            Err(code) => code,
        },
        Commands::Tools => match load_checked_config(&cli) {
            Ok(config) => server::run_tools(config),
            Err(code) => code,
        },
    }
}

/// Load devtools.toml, apply the CLI overrides and validate the result.
fn load_checked_config(cli: &Cli) -> Result<DevtoolsConfig, ExitCode> {
    let mut config = load_config(cli.config.as_deref()).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    merge_cli_overrides(&mut config, &cli.overrides());

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("Error: {}", e);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}
