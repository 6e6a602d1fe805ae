//! Whole-project analysis prompt and LLM summary.

use crate::domain::ProjectModel;
use crate::llm::{ModelClient, PromptTemplate, PromptVars};
use crate::scan::render_tree;
use crate::utils::truncate_chars;

/// Previews are taken from code files among this many leading files.
const SUMMARY_FILE_WINDOW: usize = 50;
const SUMMARY_MAX_PREVIEWS: usize = 20;
const SUMMARY_PREVIEW_CHARS: usize = 200;
const SUMMARY_MAX_FILE_TYPES: usize = 10;

/// Build the bounded context document describing the whole project.
pub fn build_summary_prompt(project: &ProjectModel) -> String {
    let stats = &project.statistics;

    let previews: Vec<String> = project
        .files
        .iter()
        .take(SUMMARY_FILE_WINDOW)
        .filter(|f| f.is_code)
        .filter_map(|f| {
            let preview = f.content_preview.as_deref().filter(|p| !p.is_empty())?;
            Some(format!(
                "File: {}\nLanguage: {}\nPreview: {}...\n",
                f.relative_path,
                if f.extension.is_empty() { "unknown" } else { f.extension.as_str() },
                truncate_chars(preview, SUMMARY_PREVIEW_CHARS)
            ))
        })
        .take(SUMMARY_MAX_PREVIEWS)
        .collect();

    let file_types = stats
        .file_types
        .iter()
        .take(SUMMARY_MAX_FILE_TYPES)
        .map(|(ext, count)| format!("{ext}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "
PROJECT ANALYSIS REQUEST

Project Name: {name}
Root Path: {root}

STATISTICS:
- Total Files: {total_files}
- Code Files: {code_files}
- Total Directories: {total_dirs}
- Total Size: {total_size} bytes
- Languages Used: {languages}
- File Types: {file_types}

PROJECT STRUCTURE:
{tree}

KEY FILES CONTENT PREVIEW:
{previews}

Please provide a comprehensive analysis of this project including:
1. Project type and purpose (based on structure and files)
2. Technology stack and architecture
3. Main components and their likely purposes
4. Code quality observations
5. Potential areas for improvement
6. Overall assessment and recommendations
",
        name = project.project_name,
        root = project.root_path.display(),
        total_files = stats.total_files,
        code_files = stats.code_files,
        total_dirs = stats.total_directories,
        total_size = stats.total_size,
        languages = stats.languages_display().unwrap_or_default(),
        tree = render_tree(&project.structure),
        previews = previews.join("\n"),
    )
}

/// Ask the model for a detailed analysis, falling back to a one-line summary
/// built from statistics when the request fails.
pub fn generate_summary(client: &dyn ModelClient, project: &ProjectModel) -> String {
    let vars = PromptVars::new().with("project_data", build_summary_prompt(project));
    match client.generate(PromptTemplate::ProjectSummary, &vars) {
        Ok(summary) => summary.trim().to_string(),
        Err(err) => {
            tracing::warn!("LLM summary failed: {}", err);
            format!(
                "Error generating LLM summary: {}\n\nFallback: Basic project analysis shows {} files across {} programming languages.",
                err,
                project.statistics.total_files,
                project.statistics.languages.len()
            )
        }
    }
}
