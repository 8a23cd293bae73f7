//! Rule to flag extension of concrete types and final class declarations.
//!
//! # Rationale
//!
//! A concrete superclass without an explicit extension signal was most
//! likely not designed to be subclassed. Extending it couples the subclass
//! to implementation details that may change underneath it (the fragile
//! base class problem). Declaring a class `final` closes it to downstream
//! extension altogether.
//!
//! # Detected Patterns
//!
//! - `ExtendsConcreteType`: a concrete class extends a concrete superclass
//!   that is not abstract, not an enum, not throwable and declares no
//!   protected constructor.
//! - `FinalType`: a class is declared `final`.
//!
//! # Good Patterns
//!
//! ```java
//! public abstract class Shape { ... }
//! public class Circle extends Shape { ... }
//!
//! public class Base {
//!     protected Base() { }   // designed for extension
//! }
//! public class Derived extends Base { ... }
//! ```

use crate::exemptions::SuperclassExemption;
use antipatterns_core::{
    ClassContext, ClassDescriptor, Finding, FindingKind, Priority, Rule, RuleError,
};
use tracing::debug;

/// Rule code for class-hierarchy.
pub const CODE: &str = "AP001";

/// Rule name for class-hierarchy.
pub const NAME: &str = "class-hierarchy";

/// Flags concrete-on-concrete extension and final classes.
#[derive(Debug, Clone)]
pub struct ClassHierarchy {
    /// Exemptions checked, in order.
    pub exemptions: Vec<SuperclassExemption>,
    /// Whether to report `FinalType` findings.
    pub report_final: bool,
    /// Priority of `ExtendsConcreteType` findings.
    pub priority: Priority,
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassHierarchy {
    /// Creates a new rule with every exemption enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            exemptions: SuperclassExemption::ALL.to_vec(),
            report_final: true,
            priority: Priority::High,
        }
    }

    /// Replaces the exemption list.
    #[must_use]
    pub fn exemptions(mut self, exemptions: impl IntoIterator<Item = SuperclassExemption>) -> Self {
        self.exemptions = exemptions.into_iter().collect();
        self
    }

    /// Removes one exemption.
    #[must_use]
    pub fn without(mut self, exemption: SuperclassExemption) -> Self {
        self.exemptions.retain(|e| *e != exemption);
        self
    }

    /// Sets whether `FinalType` findings are reported.
    #[must_use]
    pub fn report_final(mut self, report: bool) -> Self {
        self.report_final = report;
        self
    }

    /// Sets the priority of `ExtendsConcreteType` findings.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    fn check_superclass(
        &self,
        ctx: &ClassContext<'_>,
        class: &ClassDescriptor,
    ) -> Result<Option<Finding>, RuleError> {
        let Some(superclass_name) = class.superclass_name.as_deref() else {
            return Ok(None);
        };
        if ctx.platform.is_root(superclass_name) {
            return Ok(None);
        }

        let superclass = match ctx.resolver.resolve(superclass_name) {
            Ok(superclass) => superclass,
            Err(e) => {
                debug!("Skipping {}: {}", class.name, e);
                return Ok(None);
            }
        };

        for exemption in &self.exemptions {
            match exemption.applies(&superclass, ctx.resolver, ctx.platform) {
                Some(true) => {
                    debug!(
                        "{} may extend {} ({})",
                        class.name, superclass_name, exemption
                    );
                    return Ok(None);
                }
                Some(false) => {}
                None => return Ok(None),
            }
        }

        let finding = Finding::builder(FindingKind::ExtendsConcreteType, &class.name)
            .rule(NAME)
            .priority(self.priority)
            .related_class(superclass_name)
            .build()?;
        Ok(Some(finding))
    }
}

impl Rule for ClassHierarchy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags classes extending concrete types and classes declared final"
    }

    fn default_priority(&self) -> Priority {
        self.priority
    }

    fn check(
        &self,
        ctx: &mut ClassContext<'_>,
        class: &ClassDescriptor,
    ) -> Result<Vec<Finding>, RuleError> {
        if class.is_synthetic || class.is_interface {
            return Ok(Vec::new());
        }
        if class.is_abstract {
            return Ok(Vec::new());
        }
        if !ctx.try_visit(&class.name) {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();

        if self.report_final && class.is_final {
            findings.push(
                Finding::builder(FindingKind::FinalType, &class.name)
                    .rule(NAME)
                    .priority(Priority::Low)
                    .build()?,
            );
        }

        findings.extend(self.check_superclass(ctx, class)?);
        Ok(findings)
    }
}
