//! project-analyzer command-line entry point.

use anyhow::Result;

fn main() -> Result<()> {
    project_analyzer::cli::run()
}
