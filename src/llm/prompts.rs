//! Prompt templates and `{placeholder}` rendering.
//!
//! Templates use `{name}` for variables and `{{` / `}}` for literal braces.

use crate::llm::LlmError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}|\{([a-z_]+)\}").expect("valid placeholder regex"));

const PROJECT_SUMMARY: &str = r#"You are an expert software architect providing a detailed analysis of this project. Write as if you are confidently describing what this project IS and DOES.

{project_data}

Provide your analysis using confident, definitive language. Avoid tentative phrases like "appears to be", "seems to", "likely", "probably", "suggests". Instead use direct statements about what the project IS, CONTAINS, and ACCOMPLISHES.

Examples of confident language:
- "This project IS a web application that..."
- "The architecture USES a microservices pattern..."
- "The codebase IMPLEMENTS advanced algorithms..."
- "This system PROVIDES real-time data processing..."

Cover all the requested points with specific, insightful observations using definitive language."#;

const NATURAL_DESCRIPTION: &str = r#"You are writing a project description as if you are the project owner introducing YOUR project to others.

Write a brief, confident description (2-3 paragraphs) that explains what this project IS and DOES. Make it:
- Written in first person or direct statements (avoid "appears to be", "seems like", "likely", "probably")
- Confident and definitive about what the project does
- Natural and conversational tone
- Use appropriate emojis where they add value (but don't overdo it)
- Focus on the project's purpose and functionality

PROJECT DETAILS:
Project Name: {project_name}
Languages: {languages}
Total Files: {total_files}
Main Files: {main_files}
File Types: {file_types}

KEY FILES PREVIEW:
{file_preview}

Write as if you're the creator saying "This project is..." or "I built this to..." or simply state what it does directly.

Examples of what TO do:
- "This is a cryptocurrency trading bot built with Python..."
- "I created this web application to help users manage..."
- "This project provides a complete solution for..."

Examples of what NOT to do:
- "This appears to be a trading bot..."
- "The project seems to focus on..."
- "It likely handles..."
- "Based on the structure, this looks like..."

Be definitive, confident, and direct about what the project IS and DOES."#;

const DIRECTORY_DESCRIPTIONS: &str = r#"For the directory "{directory}", which contains the files: {file_list}, provide:
1. A brief description of what the directory IS and DOES (1-2 sentences) - use confident, definitive language
2. A brief description for each file explaining what it IS and DOES (1-2 sentences) - use confident, definitive language

Use confident language like "contains", "provides", "handles", "implements" instead of "appears to", "seems to", "likely".

Respond **only** with a valid JSON object in this format:
```json
{{
    "directory_description": "Description of what this directory is and does",
    "files": {{
        "file1.py": "Description of what this file is and does",
        "file2.py": "Description of what this file is and does"
    }}
}}
```"#;

/// The prompts the analyzer knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptTemplate {
    ProjectSummary,
    NaturalDescription,
    DirectoryDescriptions,
}

impl PromptTemplate {
    pub fn name(self) -> &'static str {
        match self {
            PromptTemplate::ProjectSummary => "project_summary",
            PromptTemplate::NaturalDescription => "natural_description",
            PromptTemplate::DirectoryDescriptions => "directory_descriptions",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            PromptTemplate::ProjectSummary => PROJECT_SUMMARY,
            PromptTemplate::NaturalDescription => NATURAL_DESCRIPTION,
            PromptTemplate::DirectoryDescriptions => DIRECTORY_DESCRIPTIONS,
        }
    }

    /// Substitute every placeholder. Fails on the first variable not in `vars`.
    pub fn render(self, vars: &PromptVars) -> Result<String, LlmError> {
        let mut missing: Option<String> = None;
        let rendered = PLACEHOLDER.replace_all(self.source(), |caps: &Captures| {
            match caps.get(1) {
                Some(name) => match vars.get(name.as_str()) {
                    Some(value) => value.to_string(),
                    None => {
                        missing.get_or_insert_with(|| name.as_str().to_string());
                        String::new()
                    }
                },
                None => caps[0][..1].to_string(),
            }
        });
        match missing {
            Some(name) => Err(LlmError::MissingVariable(name)),
            None => Ok(rendered.into_owned()),
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named values substituted into a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptVars(BTreeMap<String, String>);

impl PromptVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_directory_template() {
        let vars = PromptVars::new().with("directory", "src").with("file_list", "a.py, b.py");
        let prompt = PromptTemplate::DirectoryDescriptions.render(&vars).unwrap();

        assert!(prompt.starts_with("For the directory \"src\", which contains the files: a.py, b.py,"));
        assert!(prompt.contains("\"directory_description\": \"Description"));
        assert!(prompt.contains("    \"files\": {\n"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_render_reports_missing_variable() {
        let vars = PromptVars::new().with("directory", "src");
        let err = PromptTemplate::DirectoryDescriptions.render(&vars).unwrap_err();
        assert!(matches!(err, LlmError::MissingVariable(name) if name == "file_list"));
    }

    #[test]
    fn test_substituted_values_are_not_reinterpreted() {
        let vars = PromptVars::new().with("project_data", "{languages} {{x}}");
        let prompt = PromptTemplate::ProjectSummary.render(&vars).unwrap();
        assert!(prompt.contains("{languages} {{x}}"));
    }

    #[test]
    fn test_template_names() {
        assert_eq!(PromptTemplate::NaturalDescription.to_string(), "natural_description");
    }
}
