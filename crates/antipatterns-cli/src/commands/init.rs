//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# antipatterns configuration

# recommended | strict | minimal
preset = "recommended"

# Exit with status 1 when a finding reaches this priority (low | normal | high)
fail_on = "high"

# Finding kinds to drop, by name or bug code
# suppress = ["FinalType"]

[platform]
root_type = "java.lang.Object"
throwable_type = "java.lang.Throwable"
# Types under these prefixes are never reported in signatures
builtin_namespaces = ["java."]

[analyzer]
# direct: each class once; preorder: superclass chain first, then the class
traversal = "direct"
# Add the bundled java.lang / java.util descriptors to the class path
platform_types = true

[rules.class-hierarchy]
enabled = true
# priority = "high"  # Override default priority
exemptions = ["abstract", "enum", "throwable", "protected-constructor"]
report_final = true

[rules.final-signature]
enabled = true
check_constructors = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("antipatterns.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created antipatterns.toml");
    println!("\nNext steps:");
    println!("  1. Edit antipatterns.toml to configure rules");
    println!("  2. Run: antipatterns check <descriptors>");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use antipatterns::rules::configured_rules;
    use antipatterns::{Config, Priority};

    #[test]
    fn default_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.fail_on, Some(Priority::High));
        assert_eq!(configured_rules(&config).unwrap().len(), 2);
    }
}
