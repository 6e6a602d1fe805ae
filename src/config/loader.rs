//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Section name accepted as a wrapper around the settings.
const NESTED_SECTION: &str = "project-analyzer";

const CANDIDATES: &[&str] = &[
    "project-analyzer.toml",
    ".project-analyzer.toml",
    "project-analyzer.yml",
    ".project-analyzer.yml",
    "project-analyzer.yaml",
    ".project-analyzer.yaml",
];

/// Load an explicit config file, or auto-discover one in `project_root`.
///
/// Problems with an explicit file are errors. Problems with an auto-discovered
/// file are logged and the defaults are used instead.
pub fn load_config(project_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(project_root),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    match parse_config_file(&config_file) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(config)
        }
        Err(e) if !config_path_provided => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn parse_config_file(config_file: &Path) -> Result<Config> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file),
        "yaml" | "yml" => parse_yaml_config(&content, config_file),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}

/// Parse TOML config, supporting a nested [project-analyzer] section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested project-analyzer section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty document parses as null; treat it as "all defaults".
    if raw.is_null() {
        return Ok(Config::default());
    }

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(project_root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| project_root.join(candidate)).find(|path| path.is_file())
}
