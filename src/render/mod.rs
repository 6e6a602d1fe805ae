//! Output rendering (analysis JSON, README)

pub mod readme;
pub mod report;

pub use readme::{render_readme, write_readme};
pub use report::{write_analysis, AnalysisReport};
