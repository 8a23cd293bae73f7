//! Rule to flag final types exposed in public and protected signatures.
//!
//! # Rationale
//!
//! A final type in a public signature can never be replaced by a test
//! double, proxy or alternate implementation. Callers of the API are stuck
//! with the one implementation the author chose.
//!
//! Built-in platform types are exempt: they are final for platform
//! reasons outside the author's control. Enums are exempt too, since
//! finality is implied by being an enum.
//!
//! # Detected Patterns
//!
//! - `FinalTypeReturn`: an exposed method returns a final type.
//! - `FinalTypeParam`: an exposed method takes a final type parameter.
//! - `FinalTypeConstructor`: a final class exposes a constructor.

use antipatterns_core::{
    ClassContext, ClassDescriptor, Finding, FindingKind, MethodDescriptor, MethodRef, Priority,
    Rule, RuleError, TypeRef, STATIC_INITIALIZER_NAME,
};
use tracing::debug;

/// Rule code for final-signature.
pub const CODE: &str = "AP002";

/// Rule name for final-signature.
pub const NAME: &str = "final-signature";

/// Flags final types in exposed method signatures.
#[derive(Debug, Clone)]
pub struct FinalSignature {
    /// Priority of findings.
    pub priority: Priority,
    /// Whether to report exposed constructors of final classes.
    pub check_constructors: bool,
}

impl Default for FinalSignature {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalSignature {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            priority: Priority::Normal,
            check_constructors: true,
        }
    }

    /// Sets the priority level.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets whether final-class constructors are reported.
    #[must_use]
    pub fn check_constructors(mut self, check: bool) -> Self {
        self.check_constructors = check;
        self
    }

    /// Returns the offending class name if `ty` is a final, non-exempt type.
    fn illegal_final_type<'t>(&self, ctx: &ClassContext<'_>, ty: &'t TypeRef) -> Option<&'t str> {
        let name = ty.class_name()?;
        if ctx.platform.is_builtin(name) {
            return None;
        }
        match ctx.resolver.resolve(name) {
            Ok(class) if class.is_final && !class.is_enum => Some(name),
            Ok(_) => None,
            Err(e) => {
                debug!("Cannot verify {}: {}", name, e);
                None
            }
        }
    }

    fn check_method(
        &self,
        ctx: &ClassContext<'_>,
        class: &ClassDescriptor,
        method: &MethodDescriptor,
        findings: &mut Vec<Finding>,
    ) -> Result<(), RuleError> {
        let finding = |kind| {
            Finding::builder(kind, &class.name)
                .rule(NAME)
                .priority(self.priority)
                .related_method(MethodRef::of(method))
        };

        if !method.is_constructor() {
            if let Some(ty) = self.illegal_final_type(ctx, &method.return_type) {
                findings.push(
                    finding(FindingKind::FinalTypeReturn)
                        .related_type(ty)
                        .build()?,
                );
            }
        }

        if self.check_constructors && class.is_final && method.is_constructor() {
            findings.push(finding(FindingKind::FinalTypeConstructor).build()?);
        }

        for (index, param) in method.parameter_types.iter().enumerate() {
            if let Some(ty) = self.illegal_final_type(ctx, param) {
                findings.push(
                    finding(FindingKind::FinalTypeParam)
                        .parameter_index(index)
                        .related_type(ty)
                        .build()?,
                );
            }
        }

        Ok(())
    }
}

impl Rule for FinalSignature {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags final types exposed in public or protected signatures"
    }

    fn default_priority(&self) -> Priority {
        self.priority
    }

    fn check(
        &self,
        ctx: &mut ClassContext<'_>,
        class: &ClassDescriptor,
    ) -> Result<Vec<Finding>, RuleError> {
        if class.is_synthetic {
            return Ok(Vec::new());
        }
        if !ctx.try_visit(&class.name) {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();
        for method in &class.methods {
            if !method.visibility.is_exposed() || method.name == STATIC_INITIALIZER_NAME {
                continue;
            }
            self.check_method(ctx, class, method, &mut findings)?;
        }
        Ok(findings)
    }
}
