//! Type resolution: looking a named type up to its full description.

use crate::model::{ClassDescriptor, MethodDescriptor, Visibility};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Upper bound on superclass chain length walked by [`is_subtype`] and
/// [`ancestors`].
pub const MAX_HIERARCHY_DEPTH: usize = 256;

/// Errors returned by a [`ClassResolver`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// The type is not available on the class path.
    #[error("class not found: {name}")]
    NotFound {
        /// Requested name.
        name: String,
    },

    /// The type is present but its structure is inconsistent.
    #[error("malformed class {name}: {reason}")]
    Malformed {
        /// Offending name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Looks up a type's structural description by fully-qualified name.
///
/// Implementations must be deterministic within a run and free of side
/// effects visible to callers. Rules only ever read through this trait.
pub trait ClassResolver: Send + Sync {
    /// Resolves `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the type is unavailable or malformed.
    fn resolve(&self, name: &str) -> Result<Arc<ClassDescriptor>, ResolutionError>;
}

impl<R: ClassResolver + ?Sized> ClassResolver for &R {
    fn resolve(&self, name: &str) -> Result<Arc<ClassDescriptor>, ResolutionError> {
        (**self).resolve(name)
    }
}

/// In-memory class path.
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    classes: HashMap<String, Arc<ClassDescriptor>>,
}

impl ClassPath {
    /// Creates an empty class path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a class path pre-populated with core platform types.
    #[must_use]
    pub fn with_platform_types() -> Self {
        let mut cp = Self::new();
        cp.extend(platform_types());
        cp
    }

    /// Adds or replaces a class.
    pub fn insert(&mut self, class: ClassDescriptor) {
        self.classes.insert(class.name.clone(), Arc::new(class));
    }

    /// Returns the class path with `class` added.
    #[must_use]
    pub fn with(mut self, class: ClassDescriptor) -> Self {
        self.insert(class);
        self
    }

    /// Number of known classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no classes are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns true if `name` is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }
}

impl Extend<ClassDescriptor> for ClassPath {
    fn extend<I: IntoIterator<Item = ClassDescriptor>>(&mut self, iter: I) {
        for class in iter {
            self.insert(class);
        }
    }
}

impl FromIterator<ClassDescriptor> for ClassPath {
    fn from_iter<I: IntoIterator<Item = ClassDescriptor>>(iter: I) -> Self {
        let mut cp = Self::new();
        cp.extend(iter);
        cp
    }
}

impl ClassResolver for ClassPath {
    fn resolve(&self, name: &str) -> Result<Arc<ClassDescriptor>, ResolutionError> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Returns true if `name` is `ancestor` or has it somewhere up its
/// superclass chain.
///
/// # Errors
///
/// Fails if any class on the chain cannot be resolved, or if the chain is
/// cyclic or deeper than [`MAX_HIERARCHY_DEPTH`].
pub fn is_subtype(
    resolver: &dyn ClassResolver,
    name: &str,
    ancestor: &str,
) -> Result<bool, ResolutionError> {
    if name == ancestor {
        return Ok(true);
    }
    for class in ancestors(resolver, name)? {
        if class.name == ancestor {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Resolves the superclass chain of `name`, nearest first, excluding `name`
/// itself.
///
/// # Errors
///
/// Fails if any class on the chain cannot be resolved, or if the chain is
/// cyclic or deeper than [`MAX_HIERARCHY_DEPTH`].
pub fn ancestors(
    resolver: &dyn ClassResolver,
    name: &str,
) -> Result<Vec<Arc<ClassDescriptor>>, ResolutionError> {
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(name.to_string());

    let mut chain = Vec::new();
    let mut next = resolver.resolve(name)?.superclass_name.clone();

    while let Some(current) = next {
        if !seen.insert(current.clone()) {
            return Err(ResolutionError::Malformed {
                name: current,
                reason: "cyclic superclass chain".to_string(),
            });
        }
        if chain.len() >= MAX_HIERARCHY_DEPTH {
            return Err(ResolutionError::Malformed {
                name: current,
                reason: format!("superclass chain deeper than {MAX_HIERARCHY_DEPTH}"),
            });
        }
        let class = resolver.resolve(&current)?;
        next = class.superclass_name.clone();
        chain.push(class);
    }

    Ok(chain)
}

/// Core `java.lang` types, enough to resolve common superclasses and
/// signature types.
#[must_use]
pub fn platform_types() -> Vec<ClassDescriptor> {
    const OBJECT: &str = "java.lang.Object";
    let public_ctor = || MethodDescriptor::constructor(Visibility::Public);
    let protected_ctor = || MethodDescriptor::constructor(Visibility::Protected);

    let mut types = vec![
        ClassDescriptor::new(OBJECT).method(public_ctor()),
        ClassDescriptor::new("java.lang.Throwable")
            .extends(OBJECT)
            .method(public_ctor()),
        ClassDescriptor::new("java.lang.Exception")
            .extends("java.lang.Throwable")
            .method(public_ctor()),
        ClassDescriptor::new("java.lang.RuntimeException")
            .extends("java.lang.Exception")
            .method(public_ctor()),
        ClassDescriptor::new("java.lang.Error")
            .extends("java.lang.Throwable")
            .method(public_ctor()),
        ClassDescriptor::new("java.lang.IllegalArgumentException")
            .extends("java.lang.RuntimeException")
            .method(public_ctor()),
        ClassDescriptor::new("java.lang.IllegalStateException")
            .extends("java.lang.RuntimeException")
            .method(public_ctor()),
        ClassDescriptor::new("java.lang.Enum")
            .extends(OBJECT)
            .abstract_()
            .method(protected_ctor()),
        ClassDescriptor::new("java.lang.Number")
            .extends(OBJECT)
            .abstract_()
            .method(public_ctor()),
        ClassDescriptor::new("java.lang.Thread")
            .extends(OBJECT)
            .method(public_ctor()),
    ];

    for name in [
        "java.lang.String",
        "java.lang.Class",
        "java.lang.StringBuilder",
    ] {
        types.push(ClassDescriptor::new(name).extends(OBJECT).final_());
    }
    for name in [
        "java.lang.Integer",
        "java.lang.Long",
        "java.lang.Short",
        "java.lang.Byte",
        "java.lang.Double",
        "java.lang.Float",
    ] {
        types.push(
            ClassDescriptor::new(name)
                .extends("java.lang.Number")
                .final_(),
        );
    }
    for name in ["java.lang.Boolean", "java.lang.Character"] {
        types.push(ClassDescriptor::new(name).extends(OBJECT).final_());
    }
    types.push(
        ClassDescriptor::new("java.util.Optional")
            .extends(OBJECT)
            .final_(),
    );

    types
}
