//! List rules command implementation.

use antipatterns::rules::all_rules;
use antipatterns::FindingKind;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<20} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<20} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nFinding kinds:");
    for kind in FindingKind::ALL {
        println!("  {:<24} {}", kind.as_str(), kind.bug_code());
    }

    println!("\nPresets:");
    println!("  recommended  - AP001, AP002 with every exemption (default)");
    println!("  strict       - AP001, AP002; only abstract and enum superclasses exempt");
    println!("  minimal      - AP001 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  antipatterns check --rules class-hierarchy");
    println!("  antipatterns check --rules AP002");
}
