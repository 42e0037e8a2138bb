//! MCP npm_dependencies_analyze tool: look up a package's direct dependencies.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::cancellable;
use crate::config::NpmConfig;
use crate::error::ToolError;

pub const NAME: &str = "npm_dependencies_analyze";

/// Input parameters for the npm_dependencies_analyze tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NpmPackageInput {
    /// npm package name, e.g. "express" or "@types/node".
    #[schemars(description = "npm package name, e.g. 'express' or '@types/node'")]
    pub package_name: String,

    /// Version or dist-tag to inspect (defaults to the latest release).
    #[schemars(description = "Version or dist-tag to inspect (defaults to the latest release)")]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NpmPackageOutput {
    pub name: String,
    /// Resolved version
    pub version: String,
    pub latest_version: String,
    pub description: String,
    /// Direct runtime dependencies and their version ranges
    pub dependencies: BTreeMap<String, String>,
    pub dependency_count: usize,
    pub dev_dependency_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// The registry's package document. Version manifests are kept as raw JSON
/// because old releases use inconsistent shapes.
#[derive(Debug, Deserialize)]
pub struct Packument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: HashMap<String, String>,
    #[serde(default)]
    pub versions: HashMap<String, Value>,
}

/// Execute the npm_dependencies_analyze tool logic.
pub async fn run_npm_dependencies_analyze(
    input: NpmPackageInput,
    config: &NpmConfig,
    ct: &CancellationToken,
) -> Result<NpmPackageOutput, ToolError> {
    let name = input.package_name.trim();
    validate_package_name(name)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("mcp-devtools/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ToolError::external(NAME, "failed to build HTTP client", e))?;

    let url = packument_url(&config.registry, name);
    let packument = cancellable(NAME, ct, fetch_packument(&client, &url, name)).await?;
    resolve_package(&packument, input.version.as_deref())
}

fn validate_package_name(name: &str) -> Result<(), ToolError> {
    if name.is_empty() {
        return Err(ToolError::validation(NAME, "package_name must not be empty"));
    }
    if let Some(c) = name.chars().find(|c| c.is_whitespace() || matches!(c, '?' | '#' | '%' | '\\')) {
        return Err(ToolError::validation(
            NAME,
            format!("package_name '{}' contains invalid character {:?}", name, c),
        ));
    }
    Ok(())
}

/// Registry URL of a package document. The scope separator is escaped.
pub fn packument_url(registry: &str, name: &str) -> String {
    format!("{}/{}", registry.trim_end_matches('/'), name.replace('/', "%2F"))
}

async fn fetch_packument(
    client: &reqwest::Client,
    url: &str,
    name: &str,
) -> Result<Packument, ToolError> {
    let response = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ToolError::external(NAME, format!("failed to fetch {}", url), e))?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(ToolError::not_found(NAME, format!("package '{}'", name)));
    }

    let response = response.error_for_status().map_err(|e| {
        ToolError::external(NAME, format!("registry request for '{}' failed", name), e)
    })?;

    response.json::<Packument>().await.map_err(|e| {
        ToolError::external(NAME, format!("invalid registry response for '{}'", name), e)
    })
}

/// Pick a version out of the package document and summarize it.
///
/// `requested` may be an exact version or a dist-tag; `None` means latest.
pub fn resolve_package(
    packument: &Packument,
    requested: Option<&str>,
) -> Result<NpmPackageOutput, ToolError> {
    let name = &packument.name;
    let latest = packument.dist_tags.get("latest").cloned();

    let wanted = match requested.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => latest
            .clone()
            .ok_or_else(|| ToolError::not_found(NAME, format!("latest version of '{}'", name)))?,
    };
    let version = packument.dist_tags.get(&wanted).cloned().unwrap_or(wanted);

    let manifest = packument.versions.get(&version).ok_or_else(|| {
        ToolError::not_found(NAME, format!("version '{}' of package '{}'", version, name))
    })?;

    let dependencies = string_map(manifest.get("dependencies"));
    let dev_dependency_count = string_map(manifest.get("devDependencies")).len();
    let description = manifest
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| packument.description.clone())
        .unwrap_or_default();

    Ok(NpmPackageOutput {
        name: name.clone(),
        latest_version: latest.unwrap_or_else(|| version.clone()),
        version,
        description,
        dependency_count: dependencies.len(),
        dependencies,
        dev_dependency_count,
        license: license_of(manifest),
        homepage: manifest.get("homepage").and_then(Value::as_str).map(str::to_string),
    })
}

/// A `{ name: range }` object; anything else is treated as empty.
fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|deps| {
            deps.iter()
                .filter_map(|(k, v)| v.as_str().map(|range| (k.clone(), range.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// `"MIT"` or the legacy `{ "type": "MIT" }` form.
fn license_of(manifest: &Value) -> Option<String> {
    match manifest.get("license")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("type").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
