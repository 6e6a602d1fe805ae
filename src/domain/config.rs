//! Analyzer configuration as read from `project-analyzer.toml` / `.yml`.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "phi4-mini:3.8b";
pub const DEFAULT_OUTPUT_FILE: &str = "project_analysis.json";

/// Extra names skipped unless a config file supplies its own `ignore` list.
pub const DEFAULT_EXTRA_IGNORES: &[&str] =
    &["logs", "test_data", "temp", "cache", "node_modules", "data", ".next", "public"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra ignore names appended to the built-in rules. A list in a config
    /// file replaces [`DEFAULT_EXTRA_IGNORES`]; CLI names are added on top.
    #[serde(deserialize_with = "string_or_list")]
    pub ignore: Vec<String>,
    pub include_tree: bool,
    pub generate_descriptions: bool,
    /// Where the JSON analysis is written.
    pub output: PathBuf,
    pub write_readme: bool,
    /// README destination; `None` means `README.md` inside the scanned root.
    pub readme: Option<PathBuf>,
    pub model: ModelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore: DEFAULT_EXTRA_IGNORES.iter().map(|name| name.to_string()).collect(),
            include_tree: true,
            generate_descriptions: true,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            write_readme: true,
            readme: None,
            model: ModelConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            timeout_secs: 60,
        }
    }
}

/// Accept either `"a, b"` or `["a", "b"]`, trimming and dropping empty entries.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    let raw = match StringOrList::deserialize(deserializer)? {
        StringOrList::One(value) => value.split(',').map(str::to_string).collect::<Vec<_>>(),
        StringOrList::Many(values) => values,
    };
    Ok(raw
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extra_ignores() {
        let config = Config::default();
        assert_eq!(config.ignore.len(), DEFAULT_EXTRA_IGNORES.len());
        assert!(config.ignore.iter().any(|name| name == "test_data"));
        assert!(config.ignore.iter().any(|name| name == ".next"));
    }

    #[test]
    fn test_ignore_list_in_file_replaces_defaults() {
        let config: Config = toml::from_str("ignore = \"fixtures\"\n").unwrap();
        assert_eq!(config.ignore, vec!["fixtures".to_string()]);

        let config: Config = toml::from_str("include_tree = false\n").unwrap();
        assert_eq!(config.ignore, Config::default().ignore);
    }
}
