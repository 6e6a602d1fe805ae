//! Analyze command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use super::utils::{batch_progress, resolve_project_path};
use crate::analyzer::{AnalyzeOptions, ProjectAnalyzer};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::llm::OllamaClient;
use crate::render::{write_analysis, write_readme, AnalysisReport};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Project directory to analyze (prompted for when omitted on a terminal)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Path to config file (project-analyzer.toml or .yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra names or wildcard patterns to ignore (repeatable or comma-separated)
    #[arg(short = 'i', long, value_name = "NAMES", value_delimiter = ',', num_args = 1..)]
    pub ignore: Vec<String>,

    /// Leave the rendered tree out of the JSON analysis
    #[arg(long)]
    pub no_tree: bool,

    /// Skip per-directory and per-file descriptions
    #[arg(long)]
    pub no_descriptions: bool,

    /// Where to write the JSON analysis
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Where to write the README (defaults to README.md in the project)
    #[arg(long, value_name = "FILE")]
    pub readme: Option<PathBuf>,

    /// Do not write a README
    #[arg(long)]
    pub no_readme: bool,

    /// Ollama server URL
    #[arg(long, value_name = "URL", env = "OLLAMA_HOST")]
    pub base_url: Option<String>,

    /// Model name
    #[arg(short = 'm', long, value_name = "MODEL", env = "PROJECT_ANALYZER_MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let root = resolve_project_path(args.path)?;

    let file_config = load_config(&root, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            ignore: args.ignore,
            no_tree: args.no_tree,
            no_descriptions: args.no_descriptions,
            output: args.output,
            readme: args.readme,
            no_readme: args.no_readme,
            base_url: args.base_url,
            model: args.model,
            temperature: args.temperature,
            timeout_secs: args.timeout,
        },
    );

    let client = OllamaClient::new(&config.model).context("Failed to create model client")?;
    eprintln!("Analyzing project: {} (model: {})", root.display(), client.model());

    let options = AnalyzeOptions {
        extra_ignores: config.ignore.clone(),
        include_tree: config.include_tree,
        generate_descriptions: config.generate_descriptions,
    };
    let report = ProjectAnalyzer::new(&client)
        .with_progress(batch_progress())
        .analyze(&root, &options)
        .context("Error analyzing project")?;

    let stats = &report.project_info.statistics;
    eprintln!(
        "Found {} files in {} directories",
        stats.total_files, stats.total_directories
    );

    write_analysis(&config.output, &report)?;
    println!("Analysis saved to: {}", config.output.display());

    print_console_summary(&report);

    if config.write_readme {
        let readme_path = config
            .readme
            .clone()
            .unwrap_or_else(|| report.project_info.root_path.join("README.md"));
        write_readme(&readme_path, &report)?;
        println!("README.md generated at: {}", readme_path.display());
    }

    Ok(())
}

fn print_console_summary(report: &AnalysisReport) {
    let project = &report.project_info;
    let stats = &project.statistics;
    let rule = "=".repeat(50);
    let thin = "-".repeat(50);
    let section = |title: &str| format!("{thin}\n{}\n{thin}", style(title).bold());

    println!();
    println!("{rule}");
    println!("{}", style("PROJECT ANALYSIS COMPLETE").green().bold());
    println!("{rule}");
    println!();
    println!("Project: {}", project.project_name);
    println!("Files: {}", stats.total_files);
    println!("Languages: {}", stats.languages_display().unwrap_or_default());
    println!();
    println!("{}", section("NATURAL DESCRIPTION:"));
    println!("{}", report.natural_description);
    println!();
    println!("{}", section("LLM SUMMARY:"));
    println!("{}", report.llm_summary);
    if let Some(tree) = &report.tree_view {
        println!();
        println!("{}", section("PROJECT STRUCTURE:"));
        println!("{}", tree);
    }
}
