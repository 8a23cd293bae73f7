//! Descriptor files: class metadata serialized as JSON or TOML.
//!
//! A descriptor file lists the classes to analyze and, separately, classes
//! that only need to be resolvable:
//!
//! ```toml
//! [[classes]]
//! name = "com.example.Widget"
//! superclass = "com.example.Base"
//!
//! [[classpath]]
//! name = "com.example.Base"
//! superclass = "java.lang.Object"
//! ```

use crate::model::ClassDescriptor;
use crate::resolver::ClassPath;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions recognized as descriptor files.
pub const DESCRIPTOR_EXTENSIONS: &[&str] = &["json", "toml"];

/// Errors reading descriptor files.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// IO error reading a file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Invalid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// Invalid TOML.
    #[error("Invalid TOML in {path}: {message}")]
    Toml {
        /// Offending file.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Unknown file extension.
    #[error("Unsupported descriptor format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Error walking a directory.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),
}

/// Classes to analyze plus resolve-only classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorSet {
    /// Classes to analyze. These are also resolvable.
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
    /// Classes available for resolution only.
    #[serde(default)]
    pub classpath: Vec<ClassDescriptor>,
}

impl DescriptorSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses JSON content.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a descriptor set.
    pub fn from_json(content: &str, path: &Path) -> Result<Self, DescriptorError> {
        serde_json::from_str(content).map_err(|e| DescriptorError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parses TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML does not describe a descriptor set.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, DescriptorError> {
        toml::from_str(content).map_err(|e| DescriptorError::Toml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads one descriptor file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, DescriptorError> {
        let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content, path),
            Some("toml") => Self::from_toml(&content, path),
            _ => Err(DescriptorError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Loads and merges every descriptor file under `paths`.
    ///
    /// Files are read directly; directories are walked (respecting
    /// `.gitignore`) for files with a recognized extension.
    ///
    /// # Errors
    ///
    /// Returns the first read, parse or walk error.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, DescriptorError> {
        let mut set = Self::new();
        for path in paths {
            for file in discover_files(path.as_ref())? {
                debug!("Loading descriptors: {}", file.display());
                set.merge(Self::from_file(&file)?);
            }
        }
        Ok(set)
    }

    /// Appends another set.
    pub fn merge(&mut self, other: Self) {
        self.classes.extend(other.classes);
        self.classpath.extend(other.classpath);
    }

    /// Builds a class path containing both the analyzed and resolve-only
    /// classes.
    #[must_use]
    pub fn class_path(&self, platform_types: bool) -> ClassPath {
        let mut cp = if platform_types {
            ClassPath::with_platform_types()
        } else {
            ClassPath::new()
        };
        cp.extend(self.classpath.iter().cloned());
        cp.extend(self.classes.iter().cloned());
        cp
    }
}

/// Finds descriptor files at `root`.
///
/// A file path is returned as-is. A directory is walked and the matching
/// files are returned sorted.
///
/// # Errors
///
/// Returns an error if the walk fails.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>, DescriptorError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| DESCRIPTOR_EXTENSIONS.contains(&ext));
        if matches {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
