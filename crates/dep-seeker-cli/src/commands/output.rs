//! Console rendering of lint results.

use anyhow::Result;
use dep_seeker_core::{LintResult, Violation, ViolationKind};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!("{} {} in {}", violation.code, violation.rule, violation.module);
        println!("  \x1b[33mwarning\x1b[0m: {violation}");
        if let Some(help) = help(violation) {
            println!("  = help: {help}");
        }
        println!();
    }

    let summary_color = if result.is_ok() {
        "\x1b[32m"
    } else {
        "\x1b[33m"
    };
    println!(
        "{}Found {} issue(s) in {} module(s)\x1b[0m",
        summary_color,
        result.violations.len(),
        result.modules_checked
    );
}

fn help(violation: &Violation) -> Option<String> {
    match &violation.kind {
        ViolationKind::TotallyUnusedModule | ViolationKind::UnusedLibrary => Some(format!(
            "remove {} or add it to `ignored_dependencies`",
            violation.dependency
        )),
        ViolationKind::UnusedModuleWithReplacement { replacement } => {
            Some(format!("depend on {replacement} directly"))
        }
        ViolationKind::CustomCheck { .. } => None,
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for line in compact_lines(result) {
        println!("{line}");
    }
}

fn compact_lines(result: &LintResult) -> Vec<String> {
    result
        .violations
        .iter()
        .map(|v| format!("{}: [{}] {}", v.module, v.code, v))
        .collect()
}
