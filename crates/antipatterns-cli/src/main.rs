//! antipatterns CLI tool.
//!
//! Usage:
//! ```bash
//! antipatterns check [OPTIONS] [PATHS]...
//! antipatterns list-rules
//! antipatterns init
//! ```

use anyhow::Result;
use antipatterns::{Priority, Traversal};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// API-design antipattern checker for compiled class metadata
#[derive(Parser)]
#[command(name = "antipatterns")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check class descriptors for antipatterns
    Check {
        /// Descriptor files or directories (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Traversal: "direct" or "preorder"
        #[arg(long)]
        traversal: Option<Traversal>,

        /// Exit with status 1 when a finding reaches this priority
        #[arg(long)]
        fail_on: Option<Priority>,

        /// Do not add the bundled platform types to the class path
        #[arg(long)]
        no_platform_types: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            paths,
            format,
            rules,
            traversal,
            fail_on,
            no_platform_types,
        } => {
            let project_dir = paths
                .first()
                .filter(|p| p.is_dir())
                .cloned()
                .unwrap_or_else(|| PathBuf::from("."));
            let loaded = config_resolver::load(&project_dir, cli.config.as_deref())?;
            let options = commands::check::CheckOptions {
                format,
                rules,
                traversal,
                fail_on,
                platform_types: !no_platform_types,
            };
            commands::check::run(&paths, &options, loaded)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
