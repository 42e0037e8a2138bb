//! Configuration loading and discovery for `devtools.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{home_dir, DevtoolsConfig, CONFIG_FILE_NAME};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse devtools.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the scanned downloads directory
    pub downloads_dir: Option<PathBuf>,
    /// Override the command timeout
    pub exec_timeout_secs: Option<u64>,
    /// Override the npm registry URL
    pub registry: Option<String>,
    /// Enable error collection
    pub collect_errors: Option<bool>,
}

/// Locate the config file for this process.
///
/// The nearest `devtools.toml` in the working directory or one of its
/// ancestors wins; otherwise `$XDG_CONFIG_HOME/mcp-devtools/devtools.toml`
/// (falling back to `~/.config`) is used if present.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from).or_else(find_xdg_config)
}

/// The per-user config file, if it exists.
pub fn find_xdg_config() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".config")))?;

    Some(base.join("mcp-devtools").join(CONFIG_FILE_NAME)).filter(|p| p.is_file())
}

/// Nearest devtools.toml in `start` or any of its ancestors.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|p| p.is_file())
}

/// Load the server configuration.
///
/// An explicit `path` must exist. Without one the file is discovered with
/// [`find_config`], and built-in defaults apply when there is none.
///
/// ```ignore
/// let config = load_config(Some(Path::new("team/devtools.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<DevtoolsConfig, ConfigError> {
    match path.map(Path::to_path_buf).or_else(find_config) {
        Some(file) => load_config_file(&file),
        None => Ok(DevtoolsConfig::default()),
    }
}

/// Parse and validate one file. Relative paths inside it are resolved
/// against the file's directory.
fn load_config_file(path: &Path) -> Result<DevtoolsConfig, ConfigError> {
    let mut config: DevtoolsConfig = toml::from_str(&fs::read_to_string(path)?)?;

    let problems: Vec<String> = config.validate().iter().map(ToString::to_string).collect();
    if !problems.is_empty() {
        return Err(ConfigError::Validation(problems));
    }

    if let Some(root) = config_root(path) {
        config.telemetry.error_log = resolve_path(root, &config.telemetry.error_log);
        if let Some(dir) = &config.downloads.dir {
            config.downloads.dir = Some(resolve_path(root, dir));
        }
    }

    Ok(config)
}

/// Apply command-line flags on top of the file values.
pub fn merge_cli_overrides(config: &mut DevtoolsConfig, overrides: &CliOverrides) {
    if let Some(ref dir) = overrides.downloads_dir {
        config.downloads.dir = Some(dir.clone());
    }

    if let Some(timeout) = overrides.exec_timeout_secs {
        config.exec.timeout_secs = timeout;
    }

    if let Some(ref registry) = overrides.registry {
        config.npm.registry = registry.clone();
    }

    if let Some(collect_errors) = overrides.collect_errors {
        config.telemetry.collect_errors = collect_errors;
    }
}

/// Directory containing the config file, if it has one.
pub fn config_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// `path` joined onto `root` unless it is already absolute.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    root.join(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_devtools_toml_next_to_start() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[npm]\ntimeout_secs = 5");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_devtools_toml_found_from_nested_project_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("src").join("deep");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_no_devtools_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_resolves_relative_paths_against_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[downloads]
dir = "dl"
max_age_days = 30

[exec]
timeout_secs = 5
shell = "bash"

[telemetry]
collect_errors = true
error_log = "logs/errors.jsonl"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.downloads.dir, Some(temp.path().join("dl")));
        assert_eq!(config.downloads.max_age_days, 30);
        assert_eq!(config.exec.timeout_secs, 5);
        assert_eq!(config.exec.shell.as_deref(), Some("bash"));
        assert!(config.telemetry.collect_errors);
        assert_eq!(config.telemetry.error_log, temp.path().join("logs/errors.jsonl"));
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_non_http_registry_fails_validation() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[npm]\nregistry = \"registry.local\"\n");

        let result = load_config(Some(&config_path));
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("npm.registry"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_file_values() {
        let mut config = DevtoolsConfig::default();
        let overrides = CliOverrides {
            downloads_dir: Some(PathBuf::from("/tmp/dl")),
            exec_timeout_secs: Some(0),
            collect_errors: Some(true),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.downloads.dir, Some(PathBuf::from("/tmp/dl")));
        assert_eq!(config.exec.timeout_secs, 0);
        assert!(config.telemetry.collect_errors);
        assert_eq!(config.npm.registry, "https://registry.npmjs.org");
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("/other/path")), PathBuf::from("/other/path"));
        assert_eq!(resolve_path(root, Path::new("logs")), PathBuf::from("/project/logs"));
    }

    #[test]
    fn test_config_root() {
        assert_eq!(config_root(Path::new("/project/devtools.toml")), Some(Path::new("/project")));
        assert_eq!(config_root(Path::new("devtools.toml")), None);
    }
}
