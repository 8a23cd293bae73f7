//! Shared output formatting for check results.

use anyhow::Result;
use antipatterns::{AnalysisResult, Priority};

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &AnalysisResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &AnalysisResult) {
    let (high, normal, low) = result.count_by_priority();

    for finding in &result.findings {
        let priority_indicator = match finding.priority {
            Priority::High => "\x1b[31mhigh\x1b[0m",
            Priority::Normal => "\x1b[33mnormal\x1b[0m",
            Priority::Low => "\x1b[34mlow\x1b[0m",
        };

        println!(
            "{} {} in {}",
            finding.bug_code(),
            finding.rule,
            finding.subject_class
        );
        println!("  {}: {}", priority_indicator, finding.message);
        if let Some(method) = &finding.related_method {
            println!("  = method: {}", method.signature);
        }
        println!();
    }

    for failure in &result.failures {
        println!(
            "\x1b[35mfailed\x1b[0m {} on {}: {}",
            failure.rule, failure.class, failure.message
        );
    }

    let summary_color = if high > 0 {
        "\x1b[31m"
    } else if normal > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} high, {} normal, {} low priority finding(s) in {} class(es)\x1b[0m",
        summary_color, high, normal, low, result.classes_checked
    );
}

fn print_json(result: &AnalysisResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &AnalysisResult) {
    for finding in &result.findings {
        println!("{} {}", finding.bug_code(), finding);
    }
}
