//! Core types for findings and analysis results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Informational fact.
    Low,
    /// Design smell worth reviewing.
    Normal,
    /// Antipattern that should be fixed.
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unknown priority `{other}` (expected low, normal or high)"
            )),
        }
    }
}

/// The antipattern a finding reports.
///
/// The serialized names are stable identifiers that reports must keep
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    /// A concrete class extends a concrete, non-permitted superclass.
    ExtendsConcreteType,
    /// A class is declared final.
    FinalType,
    /// An exposed method returns a final type.
    FinalTypeReturn,
    /// An exposed method takes a final type as a parameter.
    FinalTypeParam,
    /// A final class exposes a public or protected constructor.
    FinalTypeConstructor,
}

impl FindingKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ExtendsConcreteType,
        Self::FinalType,
        Self::FinalTypeReturn,
        Self::FinalTypeParam,
        Self::FinalTypeConstructor,
    ];

    /// Returns the stable identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExtendsConcreteType => "ExtendsConcreteType",
            Self::FinalType => "FinalType",
            Self::FinalTypeReturn => "FinalTypeReturn",
            Self::FinalTypeParam => "FinalTypeParam",
            Self::FinalTypeConstructor => "FinalTypeConstructor",
        }
    }

    /// Returns the bug-pattern code used by existing report consumers.
    #[must_use]
    pub fn bug_code(self) -> &'static str {
        match self {
            Self::ExtendsConcreteType => "PT_EXTENDS_CONCRETE_TYPE",
            Self::FinalType => "PT_FINAL_TYPE",
            Self::FinalTypeReturn => "PT_FINAL_TYPE_RETURN",
            Self::FinalTypeParam => "PT_FINAL_TYPE_PARAM",
            Self::FinalTypeConstructor => "PT_FINAL_TYPE_CONSTRUCTOR",
        }
    }

    /// Parses either the identifier or the bug-pattern code.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name || k.bug_code() == name)
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method referenced by a finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    /// Method name (`<init>` for constructors).
    pub name: String,
    /// Rendered signature, e.g. `h(com.example.FinalParam)`.
    pub signature: String,
}

impl MethodRef {
    /// Creates a method reference from a descriptor.
    #[must_use]
    pub fn of(method: &crate::MethodDescriptor) -> Self {
        Self {
            name: method.name.clone(),
            signature: method.signature(),
        }
    }
}

/// A finding constructed without a field its kind requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FindingError {
    /// A required field was not set.
    #[error("{kind} finding for {subject} is missing required field `{field}`")]
    MissingField {
        /// Kind being built.
        kind: FindingKind,
        /// Subject class.
        subject: String,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// One reported antipattern instance.
///
/// Findings are plain values: two findings with equal fields are the same
/// finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// Antipattern reported.
    pub kind: FindingKind,
    /// Rule name that produced this finding (e.g. "class-hierarchy").
    pub rule: String,
    /// Priority of this finding.
    pub priority: Priority,
    /// Class under evaluation.
    pub subject_class: String,
    /// Related class, e.g. the extended superclass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_class: Option<String>,
    /// Related method for signature-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_method: Option<MethodRef>,
    /// Zero-based parameter index for parameter findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_parameter_index: Option<usize>,
    /// Offending type for signature-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_type: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// Starts building a finding.
    #[must_use]
    pub fn builder(kind: FindingKind, subject_class: impl Into<String>) -> FindingBuilder {
        FindingBuilder {
            kind,
            subject_class: subject_class.into(),
            rule: String::new(),
            priority: Priority::Normal,
            related_class: None,
            related_method: None,
            related_parameter_index: None,
            related_type: None,
        }
    }

    /// Returns the bug-pattern code of this finding's kind.
    #[must_use]
    pub fn bug_code(&self) -> &'static str {
        self.kind.bug_code()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.subject_class, self.priority, self.kind, self.message
        )
    }
}

/// Builder for [`Finding`] that checks per-kind required fields.
#[derive(Debug, Clone)]
pub struct FindingBuilder {
    kind: FindingKind,
    subject_class: String,
    rule: String,
    priority: Priority,
    related_class: Option<String>,
    related_method: Option<MethodRef>,
    related_parameter_index: Option<usize>,
    related_type: Option<String>,
}

impl FindingBuilder {
    /// Sets the producing rule name.
    #[must_use]
    pub fn rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the related class.
    #[must_use]
    pub fn related_class(mut self, class: impl Into<String>) -> Self {
        self.related_class = Some(class.into());
        self
    }

    /// Sets the related method.
    #[must_use]
    pub fn related_method(mut self, method: MethodRef) -> Self {
        self.related_method = Some(method);
        self
    }

    /// Sets the parameter index.
    #[must_use]
    pub fn parameter_index(mut self, index: usize) -> Self {
        self.related_parameter_index = Some(index);
        self
    }

    /// Sets the offending type.
    #[must_use]
    pub fn related_type(mut self, ty: impl Into<String>) -> Self {
        self.related_type = Some(ty.into());
        self
    }

    /// Validates and builds the finding.
    ///
    /// # Errors
    ///
    /// Returns [`FindingError::MissingField`] if a field required by the
    /// kind has not been set.
    pub fn build(self) -> Result<Finding, FindingError> {
        let missing = |field| FindingError::MissingField {
            kind: self.kind,
            subject: self.subject_class.clone(),
            field,
        };

        if self.rule.is_empty() {
            return Err(missing("rule"));
        }

        let message = match self.kind {
            FindingKind::ExtendsConcreteType => {
                let sup = self
                    .related_class
                    .as_deref()
                    .ok_or_else(|| missing("related_class"))?;
                format!("{} extends concrete type {sup}", self.subject_class)
            }
            FindingKind::FinalType => format!("{} is declared final", self.subject_class),
            FindingKind::FinalTypeReturn => {
                let method = self
                    .related_method
                    .as_ref()
                    .ok_or_else(|| missing("related_method"))?;
                let ty = self
                    .related_type
                    .as_deref()
                    .ok_or_else(|| missing("related_type"))?;
                format!("{} returns final type {ty}", method.signature)
            }
            FindingKind::FinalTypeParam => {
                let method = self
                    .related_method
                    .as_ref()
                    .ok_or_else(|| missing("related_method"))?;
                let index = self
                    .related_parameter_index
                    .ok_or_else(|| missing("related_parameter_index"))?;
                let ty = self
                    .related_type
                    .as_deref()
                    .ok_or_else(|| missing("related_type"))?;
                format!(
                    "{} takes final type {ty} as parameter {index}",
                    method.signature
                )
            }
            FindingKind::FinalTypeConstructor => {
                let method = self
                    .related_method
                    .as_ref()
                    .ok_or_else(|| missing("related_method"))?;
                format!(
                    "final class {} exposes constructor {}",
                    self.subject_class, method.signature
                )
            }
        };

        Ok(Finding {
            kind: self.kind,
            rule: self.rule,
            priority: self.priority,
            subject_class: self.subject_class,
            related_class: self.related_class,
            related_method: self.related_method,
            related_parameter_index: self.related_parameter_index,
            related_type: self.related_type,
            message,
        })
    }
}

/// A rule that failed on one class without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// Rule name.
    pub rule: String,
    /// Class being evaluated.
    pub class: String,
    /// Error message.
    pub message: String,
}

/// Result of an analysis run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// All findings, in emission order.
    pub findings: Vec<Finding>,
    /// Number of distinct classes visited.
    pub classes_checked: usize,
    /// Rule evaluations that failed with an internal error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RuleFailure>,
}

impl AnalysisResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns findings of the given kind.
    #[must_use]
    pub fn by_kind(&self, kind: FindingKind) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.kind == kind).collect()
    }

    /// Counts findings by priority as `(high, normal, low)`.
    #[must_use]
    pub fn count_by_priority(&self) -> (usize, usize, usize) {
        let count = |p| self.findings.iter().filter(|f| f.priority == p).count();
        (
            count(Priority::High),
            count(Priority::Normal),
            count(Priority::Low),
        )
    }

    /// Checks if any finding meets or exceeds the given priority.
    #[must_use]
    pub fn has_findings_at(&self, priority: Priority) -> bool {
        self.findings.iter().any(|f| f.priority >= priority)
    }
}
