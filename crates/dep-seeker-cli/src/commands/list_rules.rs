//! List rules command implementation.

use dep_seeker_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<28} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<28} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nDS100 runs once per entry of [[custom_checks]] in the config file.");
    println!("Disable a rule with `[rules.<name>] enabled = false`.");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  dep-seeker check --rules unused-library-dependency");
    println!("  dep-seeker check --rules DS001,DS100");
}
