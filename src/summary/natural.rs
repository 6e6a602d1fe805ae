//! First-person project description with a statistics-only fallback.

use crate::domain::{project_title, ProjectModel};
use crate::llm::{ModelClient, PromptTemplate, PromptVars};
use crate::utils::truncate_chars;

const PREVIEW_FILE_WINDOW: usize = 20;
const MAX_PREVIEWS: usize = 10;
const PREVIEW_CHARS: usize = 300;
const MAIN_FILE_WINDOW: usize = 10;
const MAX_MAIN_FILES: usize = 5;
const MAX_FILE_TYPES: usize = 5;

/// Variables for the natural description template.
pub fn natural_description_vars(project: &ProjectModel) -> PromptVars {
    let stats = &project.statistics;

    let previews: Vec<String> = project
        .files
        .iter()
        .take(PREVIEW_FILE_WINDOW)
        .filter(|f| f.is_code)
        .filter_map(|f| {
            let preview = f.content_preview.as_deref().filter(|p| !p.is_empty())?;
            Some(format!(
                "File: {}\nExtension: {}\nPreview: {}...\n",
                f.relative_path,
                if f.extension.is_empty() { "unknown" } else { f.extension.as_str() },
                truncate_chars(preview, PREVIEW_CHARS)
            ))
        })
        .take(MAX_PREVIEWS)
        .collect();

    let main_files: Vec<String> = project
        .files
        .iter()
        .take(MAIN_FILE_WINDOW)
        .filter(|f| f.is_code)
        .take(MAX_MAIN_FILES)
        .map(|f| format!("`{}`", f.name))
        .collect();

    let file_types = stats
        .file_types
        .iter()
        .take(MAX_FILE_TYPES)
        .map(|(ext, count)| format!("`{ext}`({count})"))
        .collect::<Vec<_>>()
        .join(", ");

    PromptVars::new()
        .with("project_name", &project.project_name)
        .with("languages", stats.languages_display().unwrap_or_else(|| "Unknown".to_string()))
        .with("total_files", stats.total_files)
        .with(
            "main_files",
            if main_files.is_empty() {
                "No main files identified".to_string()
            } else {
                main_files.join(", ")
            },
        )
        .with("file_types", file_types)
        .with("file_preview", previews.join("\n"))
}

/// Deterministic description built only from statistics.
pub fn fallback_description(project: &ProjectModel) -> String {
    let stats = &project.statistics;
    let languages = stats.languages_display().unwrap_or_else(|| "mixed technologies".to_string());
    format!(
        "🚀 **{title}** is a software project built with {languages}. \n\n\
         This project contains {files} files organized across {dirs} directories, with {code} code files making up the core functionality. \
         The project follows standard project organization patterns and is ready for development.\n\n\
         Based on the file structure and technology stack, this is a well-organized codebase that's designed for collaboration and active development! 💻✨",
        title = project_title(&project.project_name),
        files = stats.total_files,
        dirs = stats.total_directories,
        code = stats.code_files,
    )
}

/// Ask the model for a short first-person description of the project.
pub fn generate_natural_description(client: &dyn ModelClient, project: &ProjectModel) -> String {
    let vars = natural_description_vars(project);
    match client.generate(PromptTemplate::NaturalDescription, &vars) {
        Ok(description) => description.trim().to_string(),
        Err(err) => {
            tracing::warn!("Natural description failed, using fallback: {}", err);
            fallback_description(project)
        }
    }
}
