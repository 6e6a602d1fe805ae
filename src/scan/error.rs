//! Fatal scan errors.

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a whole scan. Permission problems inside the tree
/// are not errors; the affected subtree is skipped instead.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Project path does not exist or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Project contains more than {limit} files. Aborting analysis.")]
    TooManyFiles { limit: usize },

    #[error("Failed to list directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
