//! Core analyzer for orchestrating rule execution.
//!
//! The analyzer plays the traversal driver: it hands classes to every
//! enabled rule, collects findings, and keeps one rule's failure on one
//! class from affecting anything else.

use crate::config::{Config, ConfigError};
use crate::context::{ClassContext, RunContext};
use crate::model::ClassDescriptor;
use crate::resolver::{ancestors, ClassResolver};
use crate::rule::{Rule, RuleBox};
use crate::types::{AnalysisResult, Finding, FindingKind, RuleFailure};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// How an [`AnalysisRun`] walks the classes it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Visit each supplied class once.
    #[default]
    Direct,
    /// Visit the supplied ancestors of each class root-first, then the class
    /// itself. Shared ancestors are presented repeatedly; resolve-only
    /// ancestors are never evaluated.
    Preorder,
}

impl std::str::FromStr for Traversal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Self::Direct),
            "preorder" => Ok(Self::Preorder),
            other => Err(format!("unknown traversal `{other}`")),
        }
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    traversal: Option<Traversal>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the configured traversal.
    #[must_use]
    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = Some(traversal);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names an unknown finding kind.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let suppressed = config.suppressed_kinds()?;
        let traversal = self.traversal.unwrap_or(config.analyzer.traversal);

        Ok(Analyzer {
            rules: self.rules,
            config,
            traversal,
            suppressed,
        })
    }
}

/// The main analyzer that orchestrates rule execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
    traversal: Traversal,
    suppressed: Vec<FindingKind>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the traversal in effect.
    #[must_use]
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Starts a new run with fresh visited state.
    #[must_use]
    pub fn start<'a>(&'a self, resolver: &'a dyn ClassResolver) -> AnalysisRun<'a> {
        info!("Starting analysis with {} rules", self.rules.len());
        AnalysisRun {
            analyzer: self,
            resolver,
            run: RunContext::new(),
            scope: HashSet::new(),
            result: AnalysisResult::new(),
        }
    }

    /// Runs a complete analysis over `classes` using the configured
    /// traversal.
    pub fn analyze<'c, I>(&self, resolver: &dyn ClassResolver, classes: I) -> AnalysisResult
    where
        I: IntoIterator<Item = &'c ClassDescriptor>,
    {
        let classes: Vec<&ClassDescriptor> = classes.into_iter().collect();
        let mut run = self
            .start(resolver)
            .scope(classes.iter().map(|c| c.name.clone()));
        for class in classes {
            run.traverse(class);
        }
        run.finish()
    }
}

/// One analysis run.
///
/// Owns the per-run visited state, so presenting the same class more than
/// once yields findings only the first time.
pub struct AnalysisRun<'a> {
    analyzer: &'a Analyzer,
    resolver: &'a dyn ClassResolver,
    run: RunContext,
    scope: HashSet<String>,
    result: AnalysisResult,
}

impl AnalysisRun<'_> {
    /// Adds names of classes that may be evaluated when reached as an
    /// ancestor.
    ///
    /// A preorder walk only hands an ancestor to the rules when its name is
    /// in scope; other ancestors are resolve-only. [`Analyzer::analyze`]
    /// scopes a run to the classes it is given.
    #[must_use]
    pub fn scope(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.scope.extend(names);
        self
    }

    /// Visits `class` according to the analyzer's traversal.
    pub fn traverse(&mut self, class: &ClassDescriptor) -> Vec<Finding> {
        match self.analyzer.traversal {
            Traversal::Direct => self.visit(class),
            Traversal::Preorder => self.visit_preorder(class),
        }
    }

    /// Visits the in-scope part of the superclass chain of `class`
    /// root-first, then `class`.
    ///
    /// If the chain cannot be fully resolved, only `class` is visited.
    pub fn visit_preorder(&mut self, class: &ClassDescriptor) -> Vec<Finding> {
        let mut findings = Vec::new();
        match ancestors(self.resolver, &class.name) {
            Ok(chain) => {
                for ancestor in chain.iter().rev() {
                    if self.scope.contains(&ancestor.name) {
                        findings.extend(self.visit(ancestor));
                    }
                }
            }
            Err(e) => debug!("Preorder walk of {} stopped: {}", class.name, e),
        }
        findings.extend(self.visit(class));
        findings
    }

    /// Visits one class with every enabled rule.
    pub fn visit(&mut self, class: &ClassDescriptor) -> Vec<Finding> {
        let analyzer = self.analyzer;
        let mut findings = Vec::new();

        for rule in &analyzer.rules {
            if !analyzer.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let mut ctx = ClassContext::new(
                self.resolver,
                &analyzer.config.platform,
                self.run.visited(rule.name()),
            );

            match rule.check(&mut ctx, class) {
                Ok(rule_findings) => {
                    findings.extend(analyzer.suppress(rule_findings));
                }
                Err(e) => {
                    warn!("Rule {} failed on {}: {}", rule.name(), class.name, e);
                    self.result.failures.push(RuleFailure {
                        rule: rule.name().to_string(),
                        class: class.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        self.result.findings.extend(findings.iter().cloned());
        findings
    }

    /// Ends the run and returns everything found.
    #[must_use]
    pub fn finish(mut self) -> AnalysisResult {
        self.result.classes_checked = self.run.classes_seen();
        info!(
            "Analysis complete: {} findings in {} classes",
            self.result.findings.len(),
            self.result.classes_checked
        );
        self.result
    }
}

impl Analyzer {
    /// Drops findings of suppressed kinds.
    fn suppress(&self, mut findings: Vec<Finding>) -> Vec<Finding> {
        findings.retain(|f| !self.suppressed.contains(&f.kind));
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ClassPath;
    use crate::rule::RuleError;
    use crate::types::{FindingError, Priority};

    struct FlagFinal;

    impl Rule for FlagFinal {
        fn name(&self) -> &'static str {
            "flag-final"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn check(
            &self,
            ctx: &mut ClassContext<'_>,
            class: &ClassDescriptor,
        ) -> Result<Vec<Finding>, RuleError> {
            if !ctx.try_visit(&class.name) || !class.is_final {
                return Ok(Vec::new());
            }
            Ok(vec![Finding::builder(FindingKind::FinalType, &class.name)
                .rule(self.name())
                .priority(Priority::Low)
                .build()?])
        }
    }

    struct Broken;

    impl Rule for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn code(&self) -> &'static str {
            "TEST002"
        }
        fn check(
            &self,
            _ctx: &mut ClassContext<'_>,
            class: &ClassDescriptor,
        ) -> Result<Vec<Finding>, RuleError> {
            if class.name.ends_with("Bad") {
                return Err(RuleError::Finding(FindingError::MissingField {
                    kind: FindingKind::ExtendsConcreteType,
                    subject: class.name.clone(),
                    field: "related_class",
                }));
            }
            Ok(Vec::new())
        }
    }

    fn classes() -> Vec<ClassDescriptor> {
        vec![
            ClassDescriptor::new("com.example.Bad").final_(),
            ClassDescriptor::new("com.example.Good").final_(),
        ]
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .rule(FlagFinal)
            .build()
            .expect("Failed to build analyzer");
        assert_eq!(analyzer.rule_count(), 1);
        assert_eq!(analyzer.traversal(), Traversal::Direct);
    }

    #[test]
    fn rule_failure_does_not_abort_run() {
        let analyzer = Analyzer::builder()
            .rule(Broken)
            .rule(FlagFinal)
            .build()
            .unwrap();
        let result = analyzer.analyze(&ClassPath::new(), &classes());

        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].class, "com.example.Bad");
        assert_eq!(result.classes_checked, 2);
    }

    #[test]
    fn repeated_visits_are_idempotent() {
        let analyzer = Analyzer::builder().rule(FlagFinal).build().unwrap();
        let cp = ClassPath::new();
        let class = ClassDescriptor::new("com.example.F").final_();

        let mut run = analyzer.start(&cp);
        assert_eq!(run.visit(&class).len(), 1);
        assert!(run.visit(&class).is_empty());
        assert_eq!(run.finish().findings.len(), 1);

        let mut again = analyzer.start(&cp);
        assert_eq!(again.visit(&class).len(), 1);
    }

    #[test]
    fn disabled_rule_is_skipped() {
        let config = Config::parse(
            r#"
[rules.broken]
enabled = false
"#,
        )
        .unwrap();
        let analyzer = Analyzer::builder()
            .config(config)
            .rule(Broken)
            .rule(FlagFinal)
            .build()
            .unwrap();
        let result = analyzer.analyze(&ClassPath::new(), &classes());

        assert!(result.failures.is_empty());
        assert_eq!(result.findings.len(), 2);
    }

    #[test]
    fn rule_priorities_pass_through_unchanged() {
        let config = Config::parse(
            r#"
[rules.flag-final]
priority = "high"
"#,
        )
        .unwrap();
        let analyzer = Analyzer::builder()
            .config(config)
            .rule(FlagFinal)
            .build()
            .unwrap();
        let result = analyzer.analyze(&ClassPath::new(), &classes());

        // Priority options are read when the rule is built, not here.
        assert!(result.findings.iter().all(|f| f.priority == Priority::Low));
    }

    #[test]
    fn suppressed_kinds_are_dropped() {
        let config = Config::parse(r#"suppress = ["FinalType"]"#).unwrap();
        let analyzer = Analyzer::builder()
            .config(config)
            .rule(FlagFinal)
            .build()
            .unwrap();
        let result = analyzer.analyze(&ClassPath::new(), &classes());
        assert!(result.findings.is_empty());
    }

    #[test]
    fn preorder_visits_ancestors_first() {
        let cp = ClassPath::new()
            .with(ClassDescriptor::new("a.Root"))
            .with(ClassDescriptor::new("a.Mid").extends("a.Root").final_())
            .with(ClassDescriptor::new("a.Leaf").extends("a.Mid").final_());
        let analyzer = Analyzer::builder()
            .rule(FlagFinal)
            .traversal(Traversal::Preorder)
            .build()
            .unwrap();

        let leaf = ClassDescriptor::new("a.Leaf").extends("a.Mid").final_();
        let mid = ClassDescriptor::new("a.Mid").extends("a.Root").final_();
        let result = analyzer.analyze(&cp, [&leaf, &mid, &leaf]);
        let subjects: Vec<&str> = result
            .findings
            .iter()
            .map(|f| f.subject_class.as_str())
            .collect();
        assert_eq!(subjects, vec!["a.Mid", "a.Leaf"]);
        assert_eq!(result.classes_checked, 2);
    }

    #[test]
    fn preorder_skips_ancestors_outside_scope() {
        let cp = ClassPath::new()
            .with(ClassDescriptor::new("lib.Base").final_())
            .with(ClassDescriptor::new("app.Leaf").extends("lib.Base").final_());
        let analyzer = Analyzer::builder()
            .rule(FlagFinal)
            .traversal(Traversal::Preorder)
            .build()
            .unwrap();

        let leaf = ClassDescriptor::new("app.Leaf").extends("lib.Base").final_();
        let result = analyzer.analyze(&cp, [&leaf]);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].subject_class, "app.Leaf");
        assert_eq!(result.classes_checked, 1);

        let mut run = analyzer.start(&cp).scope(["lib.Base".to_string()]);
        let subjects: Vec<String> = run
            .visit_preorder(&leaf)
            .into_iter()
            .map(|f| f.subject_class)
            .collect();
        assert_eq!(subjects, vec!["lib.Base", "app.Leaf"]);
    }

    #[test]
    fn preorder_with_broken_chain_visits_class_only() {
        let analyzer = Analyzer::builder()
            .rule(FlagFinal)
            .traversal(Traversal::Preorder)
            .build()
            .unwrap();
        let orphan = ClassDescriptor::new("a.Orphan").extends("a.Missing").final_();
        let result = analyzer.analyze(&ClassPath::new(), [&orphan]);
        assert_eq!(result.findings.len(), 1);
    }
}
