//! Batch description pipeline.
//!
//! Files are grouped by parent directory, chunked into fixed-size batches and
//! described one request per batch. A failed batch degrades to fallback text
//! for that batch only; the pipeline itself never fails.

use indicatif::ProgressBar;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use super::decode::{decode_payload, extract_json_block, BatchPayload};
use crate::domain::{DescriptionMap, FileRecord, ProjectModel, DESCRIPTION_BATCH_SIZE};
use crate::llm::{LlmError, ModelClient, PromptTemplate, PromptVars};
use crate::utils::join_relative;

pub const FALLBACK_MISSING_JSON: &str = "Description unavailable due to missing JSON";
pub const FALLBACK_JSON_ERROR: &str = "Description unavailable due to JSON parsing error";
pub const FALLBACK_UNEXPECTED: &str = "Description unavailable due to unexpected error";

/// Why a batch produced no usable payload.
#[derive(Debug, Error)]
pub enum BatchFailure {
    #[error("no ```json block in model response")]
    MissingJson,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model request failed: {0}")]
    Model(#[from] LlmError),
}

impl BatchFailure {
    /// Fixed text recorded for every path the failed batch covered.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            BatchFailure::MissingJson => FALLBACK_MISSING_JSON,
            BatchFailure::InvalidJson(_) => FALLBACK_JSON_ERROR,
            BatchFailure::Model(_) => FALLBACK_UNEXPECTED,
        }
    }
}

pub struct DescriptionPipeline<'a> {
    client: &'a dyn ModelClient,
    batch_size: usize,
    progress: ProgressBar,
}

impl<'a> DescriptionPipeline<'a> {
    pub fn new(client: &'a dyn ModelClient) -> Self {
        Self { client, batch_size: DESCRIPTION_BATCH_SIZE, progress: ProgressBar::hidden() }
    }

    /// Set the number of files per request (at least one)
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Report one tick per batch on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Describe every directory and file of `project`.
    ///
    /// Every directory holding a file, and every directory the scan recorded,
    /// ends up as a key in `directories`, even when its description is empty.
    pub fn describe(&self, project: &ProjectModel) -> DescriptionMap {
        let groups = group_by_directory(project);
        let total_batches: usize =
            groups.iter().map(|(_, files)| files.len().div_ceil(self.batch_size)).sum();
        self.progress.set_length(total_batches as u64);

        let mut descriptions = DescriptionMap::default();
        for (directory, files) in &groups {
            tracing::info!("Generating descriptions for directory: {}", directory);
            self.progress.set_message(directory.clone());

            let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
            let mut directory_description: Option<String> = None;
            let mut file_descriptions: BTreeMap<String, String> = BTreeMap::new();

            for batch in names.chunks(self.batch_size) {
                match self.describe_batch(directory, batch) {
                    Ok(payload) => {
                        if directory_description.as_deref().map_or(true, str::is_empty) {
                            directory_description =
                                Some(payload.directory_description().to_string());
                        }
                        for (filename, description) in payload.files {
                            file_descriptions
                                .insert(join_relative(directory, &filename), description);
                        }
                    }
                    Err(failure) => {
                        tracing::warn!("Batch for {} failed: {}", directory, failure);
                        let fallback = failure.fallback_text();
                        if directory_description.as_deref().map_or(true, str::is_empty) {
                            directory_description = Some(fallback.to_string());
                        }
                        for filename in batch {
                            file_descriptions
                                .insert(join_relative(directory, filename), fallback.to_string());
                        }
                    }
                }
                self.progress.inc(1);
            }

            descriptions
                .directories
                .insert(directory.clone(), directory_description.unwrap_or_default());
            descriptions.files.extend(file_descriptions);
        }

        self.progress.finish_and_clear();
        descriptions
    }

    /// Request and decode descriptions for one batch of file names.
    pub fn describe_batch(
        &self,
        directory: &str,
        batch: &[&str],
    ) -> Result<BatchPayload, BatchFailure> {
        let file_list = if batch.is_empty() { "No files".to_string() } else { batch.join(", ") };
        let vars = PromptVars::new().with("directory", directory).with("file_list", file_list);

        let response = self.client.generate(PromptTemplate::DirectoryDescriptions, &vars)?;
        tracing::debug!("Raw model response for {}: {:?}", directory, response);

        let payload = extract_json_block(&response).ok_or(BatchFailure::MissingJson)?;
        tracing::debug!("Extracted JSON for {}: {}", directory, payload);

        Ok(decode_payload(payload)?)
    }
}

/// Files grouped by parent directory in first-seen order, followed by every
/// recorded directory that holds no files.
fn group_by_directory(project: &ProjectModel) -> Vec<(String, Vec<&FileRecord>)> {
    let mut groups: Vec<(String, Vec<&FileRecord>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for file in &project.files {
        let key = file.parent_key();
        match index.get(key) {
            Some(&slot) => groups[slot].1.push(file),
            None => {
                index.insert(key, groups.len());
                groups.push((key.to_string(), vec![file]));
            }
        }
    }

    for directory in &project.directories {
        if !index.contains_key(directory.as_str()) {
            index.insert(directory.as_str(), groups.len());
            groups.push((directory.clone(), Vec::new()));
        }
    }

    groups
}
