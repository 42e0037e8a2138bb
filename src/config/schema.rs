//! Configuration schema types for `devtools.toml`
//!
//! Every section is optional; missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "devtools.toml";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevtoolsConfig {
    #[serde(default)]
    pub downloads: DownloadsConfig,
    #[serde(default)]
    pub exec: ExecConfig,
    #[serde(default)]
    pub npm: NpmConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Settings for the `list_old_downloads` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadsConfig {
    /// Directory to scan. Defaults to `~/Downloads`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Files not modified for this many days are reported
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self { dir: None, max_age_days: default_max_age_days() }
    }
}

impl DownloadsConfig {
    /// The configured directory, or `Downloads` under the user's home.
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        self.dir.clone().or_else(|| home_dir().map(|h| h.join("Downloads")))
    }
}

fn default_max_age_days() -> u32 {
    90
}

/// Settings for the `execute_command` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecConfig {
    /// Kill the command after this many seconds (0 disables the limit)
    #[serde(default = "default_exec_timeout")]
    pub timeout_secs: u64,
    /// Shell used to run commands. Defaults to `sh` (`cmd` on Windows).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    /// Flag placed before the command line. Defaults to `/C` for cmd,
    /// `-Command` for PowerShell and `-c` for anything else.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_flag: Option<String>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self { timeout_secs: default_exec_timeout(), shell: None, shell_flag: None }
    }
}

fn default_exec_timeout() -> u64 {
    60
}

/// Settings for the `npm_dependencies_analyze` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NpmConfig {
    /// Registry base URL
    #[serde(default = "default_registry")]
    pub registry: String,
    /// Request timeout in seconds
    #[serde(default = "default_npm_timeout")]
    pub timeout_secs: u64,
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self { registry: default_registry(), timeout_secs: default_npm_timeout() }
    }
}

fn default_registry() -> String {
    "https://registry.npmjs.org".to_string()
}

fn default_npm_timeout() -> u64 {
    30
}

/// Error collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Append failed tool calls to `error_log`
    #[serde(default)]
    pub collect_errors: bool,
    /// JSONL file for collected errors
    #[serde(default = "default_error_log")]
    pub error_log: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { collect_errors: false, error_log: default_error_log() }
    }
}

fn default_error_log() -> PathBuf {
    PathBuf::from(".mcp-devtools/errors.jsonl")
}

/// The user's home directory from `HOME` (or `USERPROFILE` on Windows)
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "npm.registry")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' {}", CONFIG_FILE_NAME, self.field, self.message)
    }
}

impl DevtoolsConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let registry = self.npm.registry.trim();
        if !(registry.starts_with("http://") || registry.starts_with("https://")) {
            errors.push(ConfigValidationError {
                field: "npm.registry".to_string(),
                message: "must be an http(s) URL".to_string(),
            });
        }

        if self.npm.timeout_secs == 0 {
            errors.push(ConfigValidationError {
                field: "npm.timeout_secs".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        let shell_fields = [("exec.shell", &self.exec.shell), ("exec.shell_flag", &self.exec.shell_flag)];
        for (field, value) in shell_fields {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if self.telemetry.collect_errors && self.telemetry.error_log.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "telemetry.error_log".to_string(),
                message: "must be set when collect_errors is enabled".to_string(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DevtoolsConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.downloads.max_age_days, 90);
        assert_eq!(config.exec.timeout_secs, 60);
        assert_eq!(config.npm.registry, "https://registry.npmjs.org");
        assert!(!config.telemetry.collect_errors);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: DevtoolsConfig = toml::from_str("[npm]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.npm.timeout_secs, 5);
        assert_eq!(config.npm.registry, "https://registry.npmjs.org");
        assert_eq!(config.downloads.max_age_days, 90);
    }

    #[test]
    fn test_exec_shell_and_flag() {
        let config: DevtoolsConfig =
            toml::from_str("[exec]\nshell = \"pwsh\"\nshell_flag = \"-Command\"\n").unwrap();
        assert_eq!(config.exec.shell.as_deref(), Some("pwsh"));
        assert_eq!(config.exec.shell_flag.as_deref(), Some("-Command"));
        assert_eq!(config.exec.timeout_secs, 60);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<DevtoolsConfig, _> = toml::from_str("[colour]\nx = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_fields() {
        let mut config = DevtoolsConfig::default();
        config.npm.registry = "ftp://example.com".to_string();
        config.npm.timeout_secs = 0;
        config.exec.shell = Some("  ".to_string());
        config.exec.shell_flag = Some(String::new());

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["npm.registry", "npm.timeout_secs", "exec.shell", "exec.shell_flag"]);
    }

    #[test]
    fn test_explicit_downloads_dir_wins() {
        let config = DownloadsConfig { dir: Some(PathBuf::from("/data/dl")), max_age_days: 1 };
        assert_eq!(config.resolve_dir(), Some(PathBuf::from("/data/dl")));
    }
}
