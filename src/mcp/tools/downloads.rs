//! MCP list_old_downloads tool: find stale files in the downloads directory.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{blocking, cancellable};
use crate::clock::{days_ago, UtcDateTime};
use crate::config::DownloadsConfig;
use crate::error::ToolError;

pub const NAME: &str = "list_old_downloads";

/// Input parameters for the list_old_downloads tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct OldDownloadsInput {
    /// Report entries not modified for at least this many days (default: 90).
    #[serde(default)]
    pub max_age_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct OldDownloadsOutput {
    /// Operating system of the server
    pub system: String,
    /// Directory that was scanned
    pub directory: String,
    /// Old entries, oldest first
    pub files: Vec<OldFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OldFile {
    pub name: String,
    /// Last modification time (RFC 3339, UTC)
    pub last_modify: String,
    /// Size in bytes
    pub size: u64,
}

/// Execute the list_old_downloads tool logic.
pub async fn run_list_old_downloads(
    input: OldDownloadsInput,
    config: &DownloadsConfig,
    ct: &CancellationToken,
) -> Result<OldDownloadsOutput, ToolError> {
    let dir = config.resolve_dir().ok_or_else(|| {
        ToolError::external(NAME, "failed to get user home directory", "HOME is not set")
    })?;
    let max_age_days = input.max_age_days.unwrap_or(config.max_age_days);
    let cutoff = days_ago(SystemTime::now(), max_age_days);

    let scan_dir = dir.clone();
    let scan = blocking(NAME, move || {
        scan_old_files(&scan_dir, cutoff).map_err(|e| {
            ToolError::external(NAME, format!("failed to read {}", scan_dir.display()), e)
        })
    });
    let files = cancellable(NAME, ct, scan).await?;

    Ok(OldDownloadsOutput {
        system: std::env::consts::OS.to_string(),
        directory: dir.display().to_string(),
        files,
    })
}

/// List entries of `dir` last modified before `cutoff`, oldest first.
///
/// Entries whose metadata cannot be read are skipped.
pub fn scan_old_files(dir: &Path, cutoff: SystemTime) -> io::Result<Vec<OldFile>> {
    let mut old: Vec<(SystemTime, OldFile)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let Ok(metadata) = entry.metadata() else { continue };
        let Ok(modified) = metadata.modified() else { continue };

        if modified < cutoff {
            old.push((
                modified,
                OldFile {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    last_modify: UtcDateTime::from_system_time(modified).to_rfc3339(),
                    size: metadata.len(),
                },
            ));
        }
    }

    old.sort_by(|(a_time, a), (b_time, b)| a_time.cmp(b_time).then_with(|| a.name.cmp(&b.name)));
    Ok(old.into_iter().map(|(_, file)| file).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, contents: &[u8], age_days: u64) {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_days * 86_400);
        File::options().write(true).open(&path).unwrap().set_modified(mtime).unwrap();
    }

    #[test]
    fn test_scan_reports_only_old_entries_oldest_first() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "fresh.zip", b"new", 1);
        touch(temp.path(), "old.iso", b"12345", 200);
        touch(temp.path(), "older.dmg", b"1", 400);

        let cutoff = days_ago(SystemTime::now(), 90);
        let files = scan_old_files(temp.path(), cutoff).unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["older.dmg", "old.iso"]);
        assert_eq!(files[1].size, 5);
        assert!(files[0].last_modify.ends_with("+00:00"));
    }

    #[test]
    fn test_scan_missing_dir_errors() {
        let result = scan_old_files(Path::new("/nonexistent/downloads"), SystemTime::now());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_uses_configured_dir_and_input_age() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.txt", b"a", 10);
        touch(temp.path(), "b.txt", b"b", 2);

        let config = DownloadsConfig { dir: Some(temp.path().to_path_buf()), max_age_days: 90 };
        let ct = CancellationToken::new();

        let output = run_list_old_downloads(OldDownloadsInput::default(), &config, &ct)
            .await
            .unwrap();
        assert!(output.files.is_empty());
        assert_eq!(output.system, std::env::consts::OS);

        let input = OldDownloadsInput { max_age_days: Some(5) };
        let output = run_list_old_downloads(input, &config, &ct).await.unwrap();
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].name, "a.txt");
    }

    #[tokio::test]
    async fn test_run_unreadable_dir() {
        let config = DownloadsConfig {
            dir: Some(PathBuf::from("/nonexistent/mcp-devtools/Downloads")),
            max_age_days: 90,
        };
        let err = run_list_old_downloads(
            OldDownloadsInput::default(),
            &config,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "external_resource_error");
        assert!(err.to_string().contains("failed to read /nonexistent/mcp-devtools/Downloads"));
    }
}
