//! # antipatterns-rules
//!
//! Built-in API-design antipattern rules.
//!
//! ## Available Rules
//!
//! | Code | Name | Findings |
//! |------|------|----------|
//! | AP001 | `class-hierarchy` | `ExtendsConcreteType`, `FinalType` |
//! | AP002 | `final-signature` | `FinalTypeReturn`, `FinalTypeParam`, `FinalTypeConstructor` |
//!
//! ## Usage
//!
//! ```ignore
//! use antipatterns_core::Analyzer;
//! use antipatterns_rules::{ClassHierarchy, FinalSignature};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(ClassHierarchy::new())
//!     .rule(FinalSignature::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod class_hierarchy;
mod exemptions;
pub mod final_signature;
mod presets;

pub use class_hierarchy::ClassHierarchy;
pub use exemptions::SuperclassExemption;
pub use final_signature::FinalSignature;
pub use presets::{
    all_rules, configured_rule, configured_rules, minimal_rules, recommended_rules, strict_rules,
    Preset, PresetError,
};

/// Re-export core types for convenience.
pub use antipatterns_core::{Finding, FindingKind, Priority, Rule};
