//! Shared CLI utilities.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Use `path` when given; otherwise ask for one on an interactive terminal.
pub fn resolve_project_path(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("PATH is required when not running interactively");
    }
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the path to the project folder")
        .interact_text()?;
    Ok(PathBuf::from(answer.trim()))
}

/// Progress bar on stderr, hidden when stderr is not a terminal.
pub fn batch_progress() -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::resolve_project_path;
    use std::path::PathBuf;

    #[test]
    fn explicit_path_is_used_as_is() {
        let path = resolve_project_path(Some(PathBuf::from("some/dir"))).unwrap();
        assert_eq!(path, PathBuf::from("some/dir"));
    }
}
