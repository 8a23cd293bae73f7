//! Rule trait for defining antipattern detectors.

use crate::context::ClassContext;
use crate::model::ClassDescriptor;
use crate::types::{Finding, FindingError, Priority};

/// Internal failure while evaluating a rule on one class.
///
/// These indicate a defect in the rule itself, never a property of the
/// analyzed code. The analyzer isolates them to the class being evaluated.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A finding was built without a required field.
    #[error(transparent)]
    Finding(#[from] FindingError),
}

/// A per-class antipattern rule.
///
/// Rules receive one class at a time plus a [`ClassContext`] for resolving
/// other types and for deduplicating repeated visits.
///
/// # Example
///
/// ```ignore
/// use antipatterns_core::{ClassContext, ClassDescriptor, Finding, FindingKind, Rule, RuleError};
///
/// pub struct NoFinalClasses;
///
/// impl Rule for NoFinalClasses {
///     fn name(&self) -> &'static str { "no-final-classes" }
///     fn code(&self) -> &'static str { "AP100" }
///
///     fn check(&self, ctx: &mut ClassContext<'_>, class: &ClassDescriptor)
///         -> Result<Vec<Finding>, RuleError>
///     {
///         if !ctx.try_visit(&class.name) || !class.is_final {
///             return Ok(Vec::new());
///         }
///         let finding = Finding::builder(FindingKind::FinalType, &class.name)
///             .rule(self.name())
///             .build()?;
///         Ok(vec![finding])
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "class-hierarchy").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "AP001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default priority for this rule's main finding.
    fn default_priority(&self) -> Priority {
        Priority::Normal
    }

    /// Evaluates one class and returns any findings.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] only on an internal defect; resolution failures
    /// must be handled inside the rule by emitting nothing.
    fn check(
        &self,
        ctx: &mut ClassContext<'_>,
        class: &ClassDescriptor,
    ) -> Result<Vec<Finding>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::VisitedSet;
    use crate::types::FindingKind;
    use crate::{ClassPath, Platform};

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(
            &self,
            ctx: &mut ClassContext<'_>,
            class: &ClassDescriptor,
        ) -> Result<Vec<Finding>, RuleError> {
            if !ctx.try_visit(&class.name) {
                return Ok(Vec::new());
            }
            Ok(vec![Finding::builder(FindingKind::FinalType, &class.name)
                .rule(self.name())
                .build()?])
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_priority(), Priority::Normal);
    }

    #[test]
    fn test_rule_check_dedupes() {
        let cp = ClassPath::new();
        let platform = Platform::default();
        let mut visited = VisitedSet::new();
        let mut ctx = ClassContext::new(&cp, &platform, &mut visited);
        let class = ClassDescriptor::new("com.example.F").final_();

        assert_eq!(TestRule.check(&mut ctx, &class).unwrap().len(), 1);
        assert!(TestRule.check(&mut ctx, &class).unwrap().is_empty());
    }
}
