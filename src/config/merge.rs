//! Layer command-line overrides on top of a loaded config.

use crate::domain::Config;
use std::path::PathBuf;

/// Values given on the command line (or through their env fallbacks).
/// `None` / `false` means "not given", so the file or default value stays.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ignore: Vec<String>,
    pub no_tree: bool,
    pub no_descriptions: bool,
    pub output: Option<PathBuf>,
    pub readme: Option<PathBuf>,
    pub no_readme: bool,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

/// CLI > file > defaults. Ignore names accumulate instead of replacing.
pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    for name in cli.ignore {
        if !config.ignore.contains(&name) {
            config.ignore.push(name);
        }
    }
    if cli.no_tree {
        config.include_tree = false;
    }
    if cli.no_descriptions {
        config.generate_descriptions = false;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(readme) = cli.readme {
        config.readme = Some(readme);
    }
    if cli.no_readme {
        config.write_readme = false;
    }
    if let Some(base_url) = cli.base_url {
        config.model.base_url = base_url;
    }
    if let Some(model) = cli.model {
        config.model.model = model;
    }
    if let Some(temperature) = cli.temperature {
        config.model.temperature = temperature;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.model.timeout_secs = timeout_secs;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = Config::default();
        config.include_tree = false;
        config.model.model = "from-file".to_string();

        let merged = merge_cli_with_config(config.clone(), CliOverrides::default());
        assert_eq!(merged, config);
    }

    #[test]
    fn test_cli_wins_and_ignores_accumulate() {
        let mut config = Config::default();
        config.ignore = vec!["fixtures".to_string()];

        let merged = merge_cli_with_config(
            config,
            CliOverrides {
                ignore: vec!["temp".to_string(), "fixtures".to_string()],
                no_descriptions: true,
                output: Some(PathBuf::from("out.json")),
                model: Some("llama3".to_string()),
                timeout_secs: Some(5),
                ..CliOverrides::default()
            },
        );

        assert_eq!(merged.ignore, vec!["fixtures".to_string(), "temp".to_string()]);
        assert!(!merged.generate_descriptions);
        assert!(merged.include_tree);
        assert_eq!(merged.output, PathBuf::from("out.json"));
        assert_eq!(merged.model.model, "llama3");
        assert_eq!(merged.model.timeout_secs, 5);
    }
}
