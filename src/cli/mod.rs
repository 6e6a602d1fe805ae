//! Command-line interface for project-analyzer
//!
//! Provides `analyze` and `info` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod analyze;
mod info;
mod utils;

/// Scan a project directory and describe it with a local language model
#[derive(Parser)]
#[command(name = "project-analyzer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project and write the JSON analysis and README
    Analyze(Box<analyze::AnalyzeArgs>),

    /// Display project statistics and structure without querying a model
    Info(info::InfoArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(cli.verbose, rust_log.as_deref());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Analyze(args) => analyze::run(*args),
        Commands::Info(args) => info::run(args),
    }
}

/// A valid, non-empty `RUST_LOG` is used as-is. Otherwise the level is DEBUG
/// with `--verbose` and WARN without.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let from_env = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok());
    match from_env {
        Some(filter) => filter,
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("warn"),
    }
}
