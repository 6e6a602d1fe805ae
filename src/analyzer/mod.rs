//! End-to-end analysis: scan, describe, summarize.

use indicatif::ProgressBar;
use std::path::Path;

use crate::describe::DescriptionPipeline;
use crate::llm::ModelClient;
use crate::render::AnalysisReport;
use crate::scan::{render_tree, ProjectScanner, ScanError};
use crate::summary::{generate_natural_description, generate_summary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub extra_ignores: Vec<String>,
    pub include_tree: bool,
    pub generate_descriptions: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self { extra_ignores: Vec::new(), include_tree: true, generate_descriptions: true }
    }
}

pub struct ProjectAnalyzer<'a> {
    client: &'a dyn ModelClient,
    progress: Option<ProgressBar>,
}

impl<'a> ProjectAnalyzer<'a> {
    pub fn new(client: &'a dyn ModelClient) -> Self {
        Self { client, progress: None }
    }

    /// Show per-batch progress while descriptions are generated
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run the whole analysis. Only scan errors escape; every model failure
    /// has already been absorbed into fallback text.
    pub fn analyze(&self, root: &Path, options: &AnalyzeOptions) -> Result<AnalysisReport, ScanError> {
        tracing::info!("Analyzing project: {}", root.display());
        let project = ProjectScanner::new(root.to_path_buf())
            .extra_ignores(&options.extra_ignores)
            .scan()?;

        tracing::info!("Generating natural project description");
        let natural_description = generate_natural_description(self.client, &project);

        tracing::info!("Generating LLM summary");
        let llm_summary = generate_summary(self.client, &project);

        let descriptions = if options.generate_descriptions {
            tracing::info!("Generating detailed descriptions");
            let mut pipeline = DescriptionPipeline::new(self.client);
            if let Some(progress) = &self.progress {
                pipeline = pipeline.with_progress(progress.clone());
            }
            Some(pipeline.describe(&project))
        } else {
            None
        };

        let tree_view = options.include_tree.then(|| render_tree(&project.structure));

        Ok(AnalysisReport {
            project_info: project,
            natural_description,
            llm_summary,
            descriptions,
            tree_view,
        })
    }
}
