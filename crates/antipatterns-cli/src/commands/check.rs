//! Check command implementation.

use anyhow::{Context, Result};
use antipatterns::{analyze_paths_with, Priority, RunOptions, Traversal};
use std::path::PathBuf;

use crate::config_resolver::LoadedConfig;
use crate::OutputFormat;

/// Command-line options for `check`.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Traversal override.
    pub traversal: Option<Traversal>,
    /// Failing priority override.
    pub fail_on: Option<Priority>,
    /// Whether the bundled platform types may be used.
    pub platform_types: bool,
}

impl CheckOptions {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            rules: self.rules.as_deref().map(split_rule_list),
            traversal: self.traversal,
            skip_platform_types: !self.platform_types,
        }
    }
}

/// Runs the check command.
pub fn run(paths: &[PathBuf], options: &CheckOptions, loaded: LoadedConfig) -> Result<()> {
    let LoadedConfig { config, origin } = loaded;
    tracing::debug!(
        "Checking {} path(s) with config from {}",
        paths.len(),
        origin.as_deref().map_or("defaults".into(), |p| p.display().to_string())
    );
    let fail_on = options.fail_on.or(config.fail_on).unwrap_or(Priority::High);

    let result = analyze_paths_with(paths, config, &options.run_options())
        .context("Failed to analyze class descriptors")?;

    super::output::print(&result, options.format)?;

    if result.has_findings_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

fn split_rule_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}
