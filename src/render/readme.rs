//! README generation from an analysis report.

use crate::domain::{project_title, DescriptionMap, Statistics};
use crate::render::AnalysisReport;
use crate::scan::render_tree;
use crate::utils::{extension_of, file_icon, format_with_commas};
use anyhow::{Context, Result};
use std::path::Path;

pub fn quick_stats(stats: &Statistics) -> String {
    format!(
        "## 📊 Quick Stats\n\n\
         - 📁 **{} files** across {} directories\n\
         - 💻 **{} code files** in {} programming languages\n\
         - 🚀 **Languages:** {}\n\
         - 📦 **Size:** {} bytes\n\n\
         ---",
        stats.total_files,
        stats.total_directories,
        stats.code_files,
        stats.languages.len(),
        stats.languages_display().unwrap_or_else(|| "Mixed".to_string()),
        format_with_commas(stats.total_size),
    )
}

/// Every described directory and file, sorted by path.
pub fn flat_listing(descriptions: &DescriptionMap) -> String {
    let mut paths: Vec<&String> =
        descriptions.directories.keys().chain(descriptions.files.keys()).collect();
    paths.sort();
    paths.dedup();

    let mut out = String::from("## 📋 All Files and Directories\n\n");
    for path in paths {
        if let Some(desc) = descriptions.directories.get(path) {
            out.push_str(&format!("- 📁 **`{}/`** - {}\n", path, desc));
        } else if let Some(desc) = descriptions.files.get(path) {
            let icon = file_icon(&extension_of(Path::new(path)));
            out.push_str(&format!("- {} **`{}`** - {}\n", icon, path, desc));
        }
    }
    out
}

pub fn render_readme(report: &AnalysisReport) -> String {
    let project = &report.project_info;
    let tree = match &report.tree_view {
        Some(tree) => tree.clone(),
        None => render_tree(&project.structure),
    };
    // Without descriptions there is nothing to list.
    let listing = match &report.descriptions {
        Some(map) if !map.is_empty() => format!("{}\n", flat_listing(map)),
        _ => String::new(),
    };

    format!(
        "# {title}

{description}

{stats}

## 🔍 Detailed Analysis

{summary}

## 🌳 Project Structure

```
{tree}
```

{listing}---
*This README was automatically generated by project-analyzer* ✨
",
        title = project_title(&project.project_name),
        description = report.natural_description,
        stats = quick_stats(&project.statistics),
        summary = report.llm_summary,
        tree = tree,
        listing = listing,
    )
}

pub fn write_readme(readme_path: &Path, report: &AnalysisReport) -> Result<()> {
    std::fs::write(readme_path, render_readme(report))
        .with_context(|| format!("Failed writing README: {}", readme_path.display()))
}
