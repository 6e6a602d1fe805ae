//! project-analyzer: scan a project directory and describe it with a local
//! language model.
//!
//! The pipeline is scan → summarize → describe → render. The scanner builds a
//! [`domain::ProjectModel`]; the summary and description stages talk to a
//! [`llm::ModelClient`]; the render stage writes the JSON analysis and README.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod describe;
pub mod domain;
pub mod llm;
pub mod render;
pub mod scan;
pub mod summary;
pub mod utils;

pub use analyzer::{AnalyzeOptions, ProjectAnalyzer};
pub use domain::{Config, ProjectModel};
pub use scan::{scan_project, ScanError};
