//! Locating, reading and validating the configuration for a run.
//!
//! The first existing file wins: `--config`, then `antipatterns.toml` or
//! `.antipatterns.toml` in the project directory, then `config.toml` in the
//! global directory. With none of them the defaults apply.

use anyhow::{Context, Result};
use antipatterns::rules::configured_rules;
use antipatterns::Config;
use std::path::{Path, PathBuf};

/// Overrides the global directory (`~/.antipatterns` otherwise).
pub const CONFIG_DIR_ENV: &str = "ANTIPATTERNS_CONFIG_DIR";

const PROJECT_FILES: [&str; 2] = ["antipatterns.toml", ".antipatterns.toml"];

/// A validated configuration and the file it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when the defaults are in use.
    pub origin: Option<PathBuf>,
}

/// Loads the configuration for `project_dir`.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed, or if it
/// names a preset, exemption or finding kind that does not exist.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    read(locate(project_dir, explicit, global_config_dir()))
}

/// An explicit path is taken as given, so a missing file fails in [`read`].
fn locate(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .chain(global_dir.map(|dir| dir.join("config.toml")))
        .find(|candidate| candidate.is_file())
}

fn read(origin: Option<PathBuf>) -> Result<LoadedConfig> {
    let Some(path) = origin else {
        tracing::debug!("No config file found, using defaults");
        return Ok(LoadedConfig {
            config: Config::default(),
            origin: None,
        });
    };

    let config = Config::from_file(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    validate(&config).with_context(|| format!("Invalid config: {}", path.display()))?;

    tracing::info!("Using config: {}", path.display());
    Ok(LoadedConfig {
        config,
        origin: Some(path),
    })
}

/// Fails on preset or exemption names no rule accepts.
fn validate(config: &Config) -> Result<()> {
    configured_rules(config)?;
    Ok(())
}

fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".antipatterns")),
    }
}
