//! Configuration loading and merging
//!
//! A config file (explicit or discovered in the project root) is loaded first,
//! then command-line flags and their env fallbacks are layered on top
//! (CLI > Env > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};
