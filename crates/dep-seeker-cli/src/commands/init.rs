//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# dep-seeker configuration

# Analyze modules at all (per-module override: [modules.":id"] enabled)
enabled = true

# Stop with a non-zero exit code when issues are found
fail_on_violations = true

# Module ids or group:artifact:version coordinates never reported
ignored_dependencies = [
    # ":core",
    # "com.google.code.gson:gson:2.10.1",
]

# Aggregate report, relative to the project root
report = "build/dep-seeker-report.txt"

[analyzer]
# Glob patterns of source files to skip
exclude = [
    "**/generated/**",
]

# [rules.unused-library-dependency]
# enabled = false

# [modules.":legacy"]
# enabled = false
# ignored_dependencies = [":core"]

# [[custom_checks]]
# name = "no-support-lib"
# library = "com.android.support:*"
# message = "{module} still depends on {library}, migrate to androidx"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("dep-seeker.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created dep-seeker.toml");
    println!("\nNext steps:");
    println!("  1. Export the build graph to build/dep-seeker/graph.json");
    println!("  2. Run: dep-seeker check");

    Ok(())
}
