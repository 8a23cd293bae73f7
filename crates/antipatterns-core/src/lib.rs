//! # antipatterns-core
//!
//! Core framework for detecting API-design antipatterns in compiled class
//! metadata.
//!
//! This crate provides the foundational traits and types for building
//! detectors. It includes:
//!
//! - [`ClassDescriptor`] / [`MethodDescriptor`] describing compiled types
//! - [`ClassResolver`] for looking up named types, with [`ClassPath`] as an
//!   in-memory implementation
//! - [`Rule`] trait for per-class detectors
//! - [`Analyzer`] for orchestrating a run, with per-run [`RunContext`]
//! - [`Finding`] for representing reported antipatterns
//!
//! ## Example
//!
//! ```ignore
//! use antipatterns_core::{Analyzer, ClassPath};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let classpath = ClassPath::with_platform_types().with(my_class.clone());
//! let result = analyzer.analyze(&classpath, [&my_class]);
//! for finding in &result.findings {
//!     println!("{finding}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod model;
mod platform;
mod resolver;
mod rule;
mod types;

/// Descriptor file loading.
pub mod descriptor;

pub use analyzer::{AnalysisRun, Analyzer, AnalyzerBuilder, AnalyzerError, Traversal};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::{ClassContext, RunContext, VisitedSet};
pub use descriptor::{DescriptorError, DescriptorSet};
pub use model::{
    ClassDescriptor, MethodDescriptor, TypeRef, TypeRefError, Visibility, CONSTRUCTOR_NAME,
    STATIC_INITIALIZER_NAME,
};
pub use platform::Platform;
pub use resolver::{
    ancestors, is_subtype, platform_types, ClassPath, ClassResolver, ResolutionError,
    MAX_HIERARCHY_DEPTH,
};
pub use rule::{Rule, RuleBox, RuleError};
pub use types::{
    AnalysisResult, Finding, FindingBuilder, FindingError, FindingKind, MethodRef, Priority,
    RuleFailure,
};
