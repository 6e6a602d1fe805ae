//! Project scanning and tree rendering

use crate::domain::ProjectModel;
use std::path::Path;

pub mod error;
pub mod scanner;
pub mod tree;

pub use error::ScanError;
pub use scanner::ProjectScanner;
pub use tree::render_tree;

/// Scan `root` with the default rules plus `extra_ignores`.
pub fn scan_project<P, I, S>(root: P, extra_ignores: I) -> Result<ProjectModel, ScanError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ProjectScanner::new(root.as_ref().to_path_buf()).extra_ignores(extra_ignores).scan()
}
