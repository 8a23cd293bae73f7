//! Platform type names the rules treat specially.

use serde::{Deserialize, Serialize};

/// Names of the platform's foundational types.
///
/// Defaults describe the JVM. The built-in namespace scope is configurable
/// because some codebases only want `java.lang.` exempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    /// Universal root type every class ultimately extends.
    pub root_type: String,
    /// Universal throwable type.
    pub throwable_type: String,
    /// Name prefixes of built-in types exempt from signature checks.
    pub builtin_namespaces: Vec<String>,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            root_type: "java.lang.Object".to_string(),
            throwable_type: "java.lang.Throwable".to_string(),
            builtin_namespaces: vec!["java.".to_string()],
        }
    }
}

impl Platform {
    /// Returns true if `name` is the universal root type.
    #[must_use]
    pub fn is_root(&self, name: &str) -> bool {
        self.root_type == name
    }

    /// Returns true if `name` lies within a built-in namespace.
    #[must_use]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin_namespaces
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_namespace_covers_all_of_java() {
        let platform = Platform::default();
        assert!(platform.is_builtin("java.lang.String"));
        assert!(platform.is_builtin("java.util.Optional"));
        assert!(!platform.is_builtin("javax.inject.Provider"));
        assert!(!platform.is_builtin("com.example.Foo"));
    }

    #[test]
    fn narrowed_namespace() {
        let platform = Platform {
            builtin_namespaces: vec!["java.lang.".to_string()],
            ..Platform::default()
        };
        assert!(platform.is_builtin("java.lang.Integer"));
        assert!(!platform.is_builtin("java.util.Optional"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let platform: Platform = toml::from_str(r#"builtin_namespaces = ["java.lang."]"#).unwrap();
        assert_eq!(platform.root_type, "java.lang.Object");
        assert_eq!(platform.builtin_namespaces, vec!["java.lang."]);
    }
}
