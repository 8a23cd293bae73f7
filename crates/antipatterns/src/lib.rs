//! # antipatterns
//!
//! Detects API-design antipatterns in compiled class metadata: concrete
//! classes extending concrete classes, final classes, and final types in
//! public or protected signatures.
//!
//! This is the facade crate that re-exports the core framework and the
//! built-in rules.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use antipatterns::{Analyzer, ClassPath};
//! use antipatterns::rules::recommended_rules;
//!
//! let mut builder = Analyzer::builder();
//! for rule in recommended_rules() {
//!     builder = builder.rule_box(rule);
//! }
//! let analyzer = builder.build()?;
//!
//! let classpath = ClassPath::with_platform_types().with(class.clone());
//! let result = analyzer.analyze(&classpath, [&class]);
//! ```
//!
//! ## Descriptor Files
//!
//! ```rust,ignore
//! let result = antipatterns::analyze_paths(&["descriptors/"], antipatterns::Config::default())?;
//! ```

#![forbid(unsafe_code)]

pub use antipatterns_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use antipatterns_rules::*;
}

mod runner;

pub use runner::{analyze_paths, analyze_paths_with, RunError, RunOptions};
