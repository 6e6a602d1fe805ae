//! Analysis JSON generation.

use crate::domain::{DescriptionMap, ProjectModel};
use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use std::path::Path;

/// Everything one analysis run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub project_info: ProjectModel,
    pub natural_description: String,
    pub llm_summary: String,
    /// `None` when description generation was disabled; written as `{}`.
    #[serde(serialize_with = "descriptions_or_empty")]
    pub descriptions: Option<DescriptionMap>,
    pub tree_view: Option<String>,
}

fn descriptions_or_empty<S>(value: &Option<DescriptionMap>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(map) => map.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

/// Serialize with two-space indentation; non-ASCII text is kept literal.
pub fn to_json_string(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn write_analysis(report_path: &Path, report: &AnalysisReport) -> Result<()> {
    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(report_path, to_json_string(report)?)
        .with_context(|| format!("Failed writing analysis file: {}", report_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DirectoryNode, Statistics};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn report(descriptions: Option<DescriptionMap>, tree_view: Option<String>) -> AnalysisReport {
        AnalysisReport {
            project_info: ProjectModel {
                project_name: "démo".to_string(),
                root_path: PathBuf::from("/work/démo"),
                structure: DirectoryNode::default(),
                files: Vec::new(),
                directories: Vec::new(),
                statistics: Statistics::default(),
            },
            natural_description: "🚀 Démo".to_string(),
            llm_summary: "summary".to_string(),
            descriptions,
            tree_view,
        }
    }

    #[test]
    fn report_has_expected_top_level_keys() {
        let mut map = DescriptionMap::default();
        map.directories.insert("src".to_string(), "Sources".to_string());
        let json = to_json_string(&report(Some(map), Some("└─ src\n".to_string()))).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let keys: Vec<&str> =
            parsed.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["project_info", "natural_description", "llm_summary", "descriptions", "tree_view"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(parsed["descriptions"]["directories"]["src"], "Sources");
        assert_eq!(parsed["project_info"]["statistics"]["total_files"], 0);
    }

    #[test]
    fn report_keeps_non_ascii_and_indents() {
        let json = to_json_string(&report(None, None)).unwrap();
        assert!(json.contains("🚀 Démo"));
        assert!(json.contains("\n  \"project_info\": {"));
        assert!(json.contains("\"descriptions\": {}"));
        assert!(json.contains("\"tree_view\": null"));
    }

    #[test]
    fn write_analysis_creates_parent_dirs() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("out/analysis.json");
        write_analysis(&path, &report(None, None)).expect("write");

        let content = fs::read_to_string(path).expect("read");
        let parsed: serde_json::Value = serde_json::from_str(&content).expect("json");
        assert_eq!(parsed["llm_summary"], "summary");
    }
}
