//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::scan::{render_tree, ProjectScanner};
use crate::utils::{file_icon, format_with_commas};

#[derive(Args)]
pub struct InfoArgs {
    /// Local directory path to inspect
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Path to config file (project-analyzer.toml or .yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra names or wildcard patterns to ignore (repeatable or comma-separated)
    #[arg(short = 'i', long, value_name = "NAMES", value_delimiter = ',', num_args = 1..)]
    pub ignore: Vec<String>,

    /// Follow symbolic links when scanning
    #[arg(long)]
    pub follow_symlinks: bool,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let file_config = load_config(&args.path, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides { ignore: args.ignore, ..CliOverrides::default() },
    );

    let project = ProjectScanner::new(args.path)
        .extra_ignores(&config.ignore)
        .follow_symlinks(args.follow_symlinks)
        .scan()?;
    let stats = &project.statistics;

    println!("Project: {}", project.project_name);
    if let Some(languages) = stats.languages_display() {
        println!("Languages: {}", languages);
    }

    if !stats.file_types.is_empty() {
        let mut types: Vec<_> = stats.file_types.iter().collect();
        types.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        println!("File types:");
        for (ext, count) in types {
            let label = if ext.is_empty() { "(none)" } else { ext.as_str() };
            println!("  {} {}: {}", file_icon(ext), label, count);
        }
    }

    println!("Statistics:");
    println!("  Total files: {}", stats.total_files);
    println!("  Total directories: {}", stats.total_directories);
    println!("  Code files: {}", stats.code_files);
    println!("  Total bytes: {}", format_with_commas(stats.total_size));

    println!("\n{}", render_tree(&project.structure));

    Ok(())
}
