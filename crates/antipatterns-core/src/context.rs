//! Context types for rule execution.

use crate::platform::Platform;
use crate::resolver::ClassResolver;
use std::collections::{HashMap, HashSet};

/// Set of class names already evaluated in one run.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    names: HashSet<String>,
}

impl VisitedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name`, returning true only the first time it is seen.
    pub fn try_visit(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    /// Returns true if `name` has been recorded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// State owned by one analysis run.
///
/// Holds a separate visited set per rule. Create one per run and drop it
/// when the run ends; nothing leaks between runs.
#[derive(Debug, Default)]
pub struct RunContext {
    visited: HashMap<&'static str, VisitedSet>,
}

impl RunContext {
    /// Creates a fresh run context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visited set owned by `rule`.
    pub fn visited(&mut self, rule: &'static str) -> &mut VisitedSet {
        self.visited.entry(rule).or_default()
    }

    /// Total number of distinct class names any rule has visited.
    #[must_use]
    pub fn classes_seen(&self) -> usize {
        let mut all: HashSet<&str> = HashSet::new();
        for set in self.visited.values() {
            all.extend(set.names.iter().map(String::as_str));
        }
        all.len()
    }
}

/// Context handed to a rule for one class evaluation.
pub struct ClassContext<'a> {
    /// Resolver for named types.
    pub resolver: &'a dyn ClassResolver,
    /// Platform type names.
    pub platform: &'a Platform,
    visited: &'a mut VisitedSet,
}

impl<'a> ClassContext<'a> {
    /// Creates a new class context.
    #[must_use]
    pub fn new(
        resolver: &'a dyn ClassResolver,
        platform: &'a Platform,
        visited: &'a mut VisitedSet,
    ) -> Self {
        Self {
            resolver,
            platform,
            visited,
        }
    }

    /// Records `name` in the calling rule's visited set.
    ///
    /// Returns false if the rule has already evaluated `name` this run.
    pub fn try_visit(&mut self, name: &str) -> bool {
        self.visited.try_visit(name)
    }
}

impl std::fmt::Debug for ClassContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassContext")
            .field("platform", &self.platform)
            .field("visited", &self.visited.len())
            .finish_non_exhaustive()
    }
}
