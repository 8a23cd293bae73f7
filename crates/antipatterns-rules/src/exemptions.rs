//! Superclass exemptions for the class-hierarchy rule.
//!
//! Each exemption is a predicate over the resolved superclass. Any one
//! holding makes extending that superclass acceptable.

use antipatterns_core::{is_subtype, ClassDescriptor, ClassResolver, Platform, Visibility};
use tracing::debug;

/// A reason a concrete superclass may be extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuperclassExemption {
    /// The superclass is abstract.
    Abstract,
    /// The superclass is an enum.
    Enum,
    /// The superclass is the throwable type or one of its subtypes.
    Throwable,
    /// The superclass declares a protected constructor.
    ProtectedConstructor,
}

impl SuperclassExemption {
    /// All exemptions, in evaluation order.
    pub const ALL: [Self; 4] = [
        Self::Abstract,
        Self::Enum,
        Self::Throwable,
        Self::ProtectedConstructor,
    ];

    /// Returns the configuration name of this exemption.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Enum => "enum",
            Self::Throwable => "throwable",
            Self::ProtectedConstructor => "protected-constructor",
        }
    }

    /// Parses a configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Returns true if this exemption permits extending `superclass`.
    ///
    /// A throwable check that cannot walk the full ancestor chain reports
    /// `None`: the caller must not guess.
    #[must_use]
    pub fn applies(
        self,
        superclass: &ClassDescriptor,
        resolver: &dyn ClassResolver,
        platform: &Platform,
    ) -> Option<bool> {
        match self {
            Self::Abstract => Some(superclass.is_abstract),
            Self::Enum => Some(superclass.is_enum),
            Self::Throwable => {
                match is_subtype(resolver, &superclass.name, &platform.throwable_type) {
                    Ok(is_throwable) => Some(is_throwable),
                    Err(e) => {
                        debug!("Cannot decide throwable for {}: {}", superclass.name, e);
                        None
                    }
                }
            }
            Self::ProtectedConstructor => Some(
                superclass
                    .constructors()
                    .any(|c| c.visibility == Visibility::Protected),
            ),
        }
    }
}

impl std::fmt::Display for SuperclassExemption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
