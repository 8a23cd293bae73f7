//! Configuration-driven runs over descriptor files.

use antipatterns_core::{
    AnalysisResult, Analyzer, AnalyzerError, Config, DescriptorError, DescriptorSet, RuleBox,
    Traversal,
};
use antipatterns_rules::{configured_rule, configured_rules, PresetError};
use std::path::Path;
use thiserror::Error;

/// Errors from [`analyze_paths`].
#[derive(Debug, Error)]
pub enum RunError {
    /// Rules could not be built from the configuration.
    #[error(transparent)]
    Preset(#[from] PresetError),

    /// The analyzer rejected the configuration.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// Descriptor files could not be loaded.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Overrides applied on top of the configuration for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Rule names or codes to run instead of the preset.
    pub rules: Option<Vec<String>>,
    /// Traversal override.
    pub traversal: Option<Traversal>,
    /// Leave the bundled platform types off the class path.
    pub skip_platform_types: bool,
}

/// Loads every descriptor file under `paths` and checks its classes with
/// the rules `config` selects.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a descriptor file
/// cannot be loaded.
pub fn analyze_paths<P: AsRef<Path>>(
    paths: &[P],
    config: Config,
) -> Result<AnalysisResult, RunError> {
    analyze_paths_with(paths, config, &RunOptions::default())
}

/// Like [`analyze_paths`], with command-line style overrides.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a descriptor file
/// cannot be loaded.
pub fn analyze_paths_with<P: AsRef<Path>>(
    paths: &[P],
    config: Config,
    options: &RunOptions,
) -> Result<AnalysisResult, RunError> {
    let rules = match &options.rules {
        Some(names) => select_rules(&config, names)?,
        None => configured_rules(&config)?,
    };
    let platform_types = config.analyzer.platform_types && !options.skip_platform_types;

    let mut builder = Analyzer::builder().config(config);
    if let Some(traversal) = options.traversal {
        builder = builder.traversal(traversal);
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder.build()?;

    let descriptors = DescriptorSet::load(paths)?;
    tracing::info!(
        "Analyzing {} classes ({} resolve-only) with {} rules",
        descriptors.classes.len(),
        descriptors.classpath.len(),
        analyzer.rule_count()
    );

    let classpath = descriptors.class_path(platform_types);
    Ok(analyzer.analyze(&classpath, &descriptors.classes))
}

/// Builds the named rules with their configured options.
///
/// Unknown names are logged and skipped; repeats are built once.
fn select_rules(config: &Config, names: &[String]) -> Result<Vec<RuleBox>, PresetError> {
    let mut rules: Vec<RuleBox> = Vec::new();

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        match configured_rule(config, name)? {
            Some(rule) if rules.iter().any(|r| r.name() == rule.name()) => {}
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    Ok(rules)
}
