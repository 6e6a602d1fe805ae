//! Core data model shared by the scanner, description pipeline and renderers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub mod config;

pub use config::{Config, ModelConfig};

/// Hard ceiling on the number of files a single scan may visit.
pub const MAX_SCAN_FILES: usize = 500;

/// Files at or above this size never get a content preview.
pub const PREVIEW_MAX_FILE_BYTES: u64 = 50_000;

/// Number of characters kept in a content preview.
pub const PREVIEW_CHARS: usize = 500;

/// Number of files submitted together in one description request.
pub const DESCRIPTION_BATCH_SIZE: usize = 10;

/// Directory key used for files that sit directly in the scan root.
pub const ROOT_DIRECTORY_KEY: &str = "root";

/// A single file discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
    /// Lower-cased, including the leading dot. Empty when the file has none.
    pub extension: String,
    pub is_code: bool,
    pub content_preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
}

impl FileRecord {
    /// Relative path of the containing directory, or [`ROOT_DIRECTORY_KEY`]
    /// for top-level files.
    pub fn parent_key(&self) -> &str {
        match self.relative_path.rfind('/') {
            Some(idx) => &self.relative_path[..idx],
            None => ROOT_DIRECTORY_KEY,
        }
    }
}

/// Leaf entry of the structural tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub extension: String,
}

/// Directory entry of the structural tree. The scan root has an empty `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    pub path: String,
    pub items: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Directory(DirectoryNode),
    File(FileNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory(dir) => &dir.name,
            TreeNode::File(file) => &file.name,
        }
    }
}

/// Aggregate counters collected while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_files: usize,
    pub total_directories: usize,
    pub code_files: usize,
    pub total_size: u64,
    pub file_types: BTreeMap<String, usize>,
    pub languages: BTreeSet<String>,
}

impl Statistics {
    /// Detected languages joined for display, or `None` when nothing was detected.
    pub fn languages_display(&self) -> Option<String> {
        if self.languages.is_empty() {
            None
        } else {
            Some(self.languages.iter().map(String::as_str).collect::<Vec<_>>().join(", "))
        }
    }
}

/// Everything a scan knows about a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    pub project_name: String,
    pub root_path: PathBuf,
    pub structure: DirectoryNode,
    pub files: Vec<FileRecord>,
    pub directories: Vec<String>,
    pub statistics: Statistics,
}

/// Per-path descriptions produced by the batch description pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionMap {
    pub directories: BTreeMap<String, String>,
    pub files: BTreeMap<String, String>,
}

impl DescriptionMap {
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}

/// Title used for generated documents: `my_cool-app` becomes `My Cool App`.
pub fn project_title(project_name: &str) -> String {
    project_name
        .replace(['_', '-'], " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
