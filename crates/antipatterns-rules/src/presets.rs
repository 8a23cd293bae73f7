//! Rule presets and configuration-driven rule construction.

use crate::exemptions::SuperclassExemption;
use crate::{class_hierarchy, final_signature, ClassHierarchy, FinalSignature};
use antipatterns_core::{Config, RuleBox, RuleConfig};

/// Preset configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Both rules with every exemption.
    Recommended,
    /// Both rules, exempting only abstract and enum superclasses.
    Strict,
    /// Class-hierarchy only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Parses a preset name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Errors building rules from configuration.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    /// Unknown preset name.
    #[error("unknown preset `{0}`. Valid presets: recommended, strict, minimal")]
    UnknownPreset(String),

    /// Unknown exemption name.
    #[error("unknown exemption `{0}` for class-hierarchy")]
    UnknownExemption(String),
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `class-hierarchy` (AP001) with all exemptions
/// - `final-signature` (AP002)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ClassHierarchy::new()),
        Box::new(FinalSignature::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Extending a throwable or a class with a protected constructor is
/// reported too.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(hierarchy_for(Preset::Strict)),
        Box::new(FinalSignature::new()),
    ]
}

fn hierarchy_for(preset: Preset) -> ClassHierarchy {
    match preset {
        Preset::Strict => ClassHierarchy::new()
            .exemptions([SuperclassExemption::Abstract, SuperclassExemption::Enum]),
        Preset::Recommended | Preset::Minimal => ClassHierarchy::new(),
    }
}

/// Returns the minimal set of rules.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(ClassHierarchy::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    recommended_rules()
}

/// Builds rules for the configured preset, applying rule options.
///
/// # Errors
///
/// Returns an error on an unknown preset or exemption name.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, PresetError> {
    let preset = configured_preset(config)?;

    let mut rules: Vec<RuleBox> = vec![Box::new(configured_hierarchy(config, preset)?)];
    if preset != Preset::Minimal {
        rules.push(Box::new(configured_signature(config)));
    }
    Ok(rules)
}

/// Builds one rule by name or code, applying its configured options.
///
/// Returns `Ok(None)` for an unknown rule. The preset only contributes its
/// defaults here; a rule left out of the preset is still built.
///
/// # Errors
///
/// Returns an error on an unknown preset or exemption name.
pub fn configured_rule(config: &Config, name: &str) -> Result<Option<RuleBox>, PresetError> {
    let preset = configured_preset(config)?;
    let rule: RuleBox = match name {
        class_hierarchy::NAME | class_hierarchy::CODE => {
            Box::new(configured_hierarchy(config, preset)?)
        }
        final_signature::NAME | final_signature::CODE => Box::new(configured_signature(config)),
        _ => return Ok(None),
    };
    Ok(Some(rule))
}

fn configured_preset(config: &Config) -> Result<Preset, PresetError> {
    let name = config.preset.as_deref().unwrap_or("recommended");
    Preset::from_name(name).ok_or_else(|| PresetError::UnknownPreset(name.to_string()))
}

fn configured_hierarchy(config: &Config, preset: Preset) -> Result<ClassHierarchy, PresetError> {
    let mut hierarchy = hierarchy_for(preset);
    if let Some(priority) = config.rule_priority(class_hierarchy::NAME) {
        hierarchy = hierarchy.priority(priority);
    }
    match config.rules.get(class_hierarchy::NAME) {
        Some(rule_config) => apply_hierarchy_options(hierarchy, rule_config),
        None => Ok(hierarchy),
    }
}

fn configured_signature(config: &Config) -> FinalSignature {
    let mut signature = FinalSignature::new();
    if let Some(priority) = config.rule_priority(final_signature::NAME) {
        signature = signature.priority(priority);
    }
    match config.rules.get(final_signature::NAME) {
        Some(rule_config) => {
            signature.check_constructors(rule_config.get_bool("check_constructors", true))
        }
        None => signature,
    }
}

fn apply_hierarchy_options(
    mut rule: ClassHierarchy,
    config: &RuleConfig,
) -> Result<ClassHierarchy, PresetError> {
    if let Some(names) = config.get_str_array("exemptions") {
        let exemptions = names
            .iter()
            .map(|n| {
                SuperclassExemption::from_name(n)
                    .ok_or_else(|| PresetError::UnknownExemption(n.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rule = rule.exemptions(exemptions);
    }
    Ok(rule.report_final(config.get_bool("report_final", true)))
}
